//! FILENAME: app/src-tauri/src/lib.rs
// PURPOSE: Main library entry point (Tauri shell).
// CONTEXT: Owns the window registry and display cache, wires menu, window and
//          run events, and hands validated range files to every window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tauri::{Manager, Runtime, WebviewWindow, Wry};

pub mod commands;
pub mod config;
pub mod dialog;
pub mod display;
pub mod lifecycle;
pub mod logging;
pub mod menu;
pub mod navigation;
pub mod range_import;
pub mod registry;
pub mod window;

pub use config::ShellConfig;
pub use dialog::{DialogGate, DialogGuard};
pub use display::{DisplayDescriptor, DisplayTracker};
pub use logging::{get_log_path, init_log_file, next_seq, write_log, LogLevel};
pub use navigation::{NavigationDecision, NavigationPolicy};
pub use range_import::{deliver_range, load_range, RangeAlert, RangeDelivery};
pub use registry::{ShellWindow, WebPreferences, WindowRegistry};

#[cfg(test)]
mod tests;

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct ShellState<R: Runtime = Wry> {
    pub config: ShellConfig,
    /// The only webview configuration allowed to attach.
    pub sanctioned: WebPreferences,
    pub navigation: NavigationPolicy,
    pub dialog: DialogGate,
    windows: Mutex<WindowRegistry<WebviewWindow<R>>>,
    displays: Mutex<DisplayTracker>,
    import_enabled: AtomicBool,
}

impl<R: Runtime> ShellState<R> {
    pub fn new(config: ShellConfig) -> Self {
        ShellState {
            sanctioned: WebPreferences::sanctioned(window::PRELOAD_SCRIPT, config.dev_mode),
            navigation: NavigationPolicy::new(&config),
            dialog: DialogGate::new(),
            windows: Mutex::new(WindowRegistry::new()),
            displays: Mutex::new(DisplayTracker::new()),
            import_enabled: AtomicBool::new(false),
            config,
        }
    }

    /// Registry lock. Do not call window methods while holding it.
    pub fn registry(&self) -> MutexGuard<'_, WindowRegistry<WebviewWindow<R>>> {
        self.windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn displays(&self) -> MutexGuard<'_, DisplayTracker> {
        self.displays.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Tracked windows at this moment, with the lock already released.
    pub fn windows_snapshot(&self) -> Vec<WebviewWindow<R>> {
        self.registry().snapshot()
    }

    pub fn attach_allowed(&self, label: &str) -> bool {
        self.registry().is_sanctioned(label, &self.sanctioned)
    }

    /// Whether File > Open Range is currently offered.
    pub fn import_enabled(&self) -> bool {
        self.import_enabled.load(Ordering::SeqCst)
    }

    /// Record the import flag; returns the previous value.
    pub fn set_import_enabled(&self, enabled: bool) -> bool {
        self.import_enabled.swap(enabled, Ordering::SeqCst)
    }
}

// ============================================================================
// TAURI APP ENTRY
// ============================================================================

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let config = ShellConfig::from_env();
    logging::install_log_bridge(config.log_level());

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(navigation::attach_guard())
        .manage(ShellState::<Wry>::new(config))
        .invoke_handler(tauri::generate_handler![
            commands::open_range_dialog,
            commands::open_new_window,
            commands::open_range_builder,
            commands::get_shell_config,
            logging::get_next_seq,
            logging::log_frontend_atomic,
        ])
        .on_menu_event(menu::handle_menu_event)
        .on_window_event(lifecycle::handle_window_event)
        .setup(|app| {
            match app.path().app_log_dir() {
                Ok(dir) => match init_log_file(&dir) {
                    Ok(path) => log_info!("SYS", "Range Assistant starting, log={}", path.display()),
                    Err(e) => eprintln!("[LOG_INIT] {} - continuing with console-only logging", e),
                },
                Err(e) => eprintln!("[LOG_INIT] No log directory: {}", e),
            }
            lifecycle::on_ready(app.handle())?;
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building Range Assistant");

    app.run(lifecycle::handle_run_event);
}
