//! FILENAME: app/src-tauri/src/lifecycle.rs
// PURPOSE: Application and window lifecycle wiring.
// CONTEXT: ready -> first window; last window gone -> import off (and exit off
//          macOS); macOS reopen -> new window; open-file -> range import;
//          focus/blur -> dim background windows.

use std::ffi::OsString;
use std::path::PathBuf;

use range_file::is_range_path;
use tauri::{AppHandle, Manager, RunEvent, Runtime, Url, Window, WindowEvent};

use crate::config::{BLURRED_OPACITY, FOCUSED_OPACITY};
use crate::display::{check_topology, prime_display_cache, start_display_watcher};
use crate::menu::set_menu;
use crate::range_import::handle_range_file;
use crate::registry::apply_opacity;
use crate::window::create_app_window;
use crate::{log_debug, log_error, log_info, ShellState};

// ============================================================================
// FILE ARGUMENTS
// ============================================================================

/// Range files passed on the command line (file association launch on
/// Windows/Linux). Flags and other files are ignored.
pub fn launch_paths<I>(args: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .filter(|arg| !arg.to_string_lossy().starts_with('-'))
        .map(PathBuf::from)
        .filter(|path| is_range_path(path))
        .collect()
}

/// Local paths from an open-file event. Non-file URLs are dropped.
pub fn opened_paths(urls: &[Url]) -> Vec<PathBuf> {
    urls.iter()
        .filter(|url| url.scheme() == "file")
        .filter_map(|url| url.to_file_path().ok())
        .collect()
}

/// Whether the process outlives its last window (macOS convention).
pub fn keep_alive_without_windows() -> bool {
    cfg!(target_os = "macos")
}

// ============================================================================
// READY
// ============================================================================

pub fn on_ready(app: &AppHandle) -> Result<(), String> {
    prime_display_cache(app);
    start_display_watcher(app);
    create_app_window(app)?;

    for path in launch_paths(std::env::args_os().skip(1)) {
        handle_range_file(app, path);
    }
    Ok(())
}

// ============================================================================
// WINDOW EVENTS
// ============================================================================

fn on_window_destroyed<R: Runtime>(app: &AppHandle<R>, label: &str) {
    let state = app.state::<ShellState<R>>();
    let remaining = {
        let mut registry = state.registry();
        registry.untrack(label);
        registry.len()
    };
    log_info!("WINDOW", "closed {} ({} open)", label, remaining);
    if remaining == 0 {
        set_menu(app, false);
    }
}

pub fn handle_window_event<R: Runtime>(window: &Window<R>, event: &WindowEvent) {
    let app = window.app_handle();
    match event {
        WindowEvent::Focused(focused) => {
            let opacity = if *focused { FOCUSED_OPACITY } else { BLURRED_OPACITY };
            let windows = app.state::<ShellState<R>>().windows_snapshot();
            apply_opacity(&windows, opacity);
        }
        WindowEvent::ScaleFactorChanged { .. } => check_topology(app),
        WindowEvent::Destroyed => on_window_destroyed(app, window.label()),
        _ => {}
    }
}

// ============================================================================
// RUN EVENTS
// ============================================================================

pub fn handle_run_event(app: &AppHandle, event: RunEvent) {
    match event {
        #[cfg(any(target_os = "macos", target_os = "ios"))]
        RunEvent::Opened { urls } => {
            for path in opened_paths(&urls) {
                handle_range_file(app, path);
            }
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            let empty = app.state::<ShellState>().registry().is_empty();
            if empty {
                if let Err(e) = create_app_window(app) {
                    log_error!("SYS", "reopen failed: {}", e);
                }
            }
        }
        RunEvent::ExitRequested { code, api, .. } => {
            if code.is_none() && keep_alive_without_windows() {
                log_debug!("SYS", "all windows closed, staying resident");
                api.prevent_exit();
            }
        }
        RunEvent::Exit => log_info!("SYS", "exiting"),
        _ => {}
    }
}
