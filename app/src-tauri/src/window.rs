//! FILENAME: app/src-tauri/src/window.rs
// PURPOSE: Window factory - builds shell windows with the fixed profile and
//          registers them.
// CONTEXT: Called on startup, from File > New Window, on macOS reopen and from
//          the `open_new_window` command.

use serde_json::Value;
use tauri::webview::NewWindowResponse;
use tauri::window::Color;
use tauri::{
    AppHandle, Emitter, EventTarget, Manager, PhysicalPosition, Runtime, Url, WebviewUrl,
    WebviewWindow, WebviewWindowBuilder,
};
use uuid::Uuid;

use crate::config::{ShellConfig, APP_ENTRY, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::navigation::enforce;
use crate::range_import::ADD_RANGE_EVENT;
use crate::registry::ShellWindow;
use crate::{log_error, log_info, menu, ShellState};

/// Injected into every window before page scripts run.
pub const PRELOAD_SCRIPT: &str = include_str!("../preload/preload.js");

/// Prefix shared by all shell window labels (capabilities match on it).
pub const WINDOW_LABEL_PREFIX: &str = "range-";

impl<R: Runtime> ShellWindow for WebviewWindow<R> {
    fn label(&self) -> &str {
        WebviewWindow::label(self)
    }

    fn reset_position(&self) -> Result<(), String> {
        self.set_position(PhysicalPosition::new(0i32, 0i32))
            .map_err(|e| e.to_string())
    }

    // Tauri has no native window opacity, so the document root is faded instead.
    fn set_opacity(&self, opacity: f64) -> Result<(), String> {
        self.eval(&format!(
            "document.documentElement.style.opacity = '{}';",
            opacity.clamp(0.0, 1.0)
        ))
        .map_err(|e| e.to_string())
    }

    fn send_range(&self, range: &Value) -> Result<(), String> {
        let target = EventTarget::webview_window(WebviewWindow::label(self));
        self.emit_to(target, ADD_RANGE_EVENT, range)
            .map_err(|e| e.to_string())
    }
}

pub fn new_window_label() -> String {
    format!("{}{}", WINDOW_LABEL_PREFIX, Uuid::new_v4().simple())
}

/// Dev server in development builds, the bundled entry page otherwise.
pub fn window_url(config: &ShellConfig) -> Result<WebviewUrl, String> {
    if config.dev_mode {
        let url = Url::parse(&config.dev_server_url)
            .map_err(|e| format!("Invalid dev server URL {}: {}", config.dev_server_url, e))?;
        Ok(WebviewUrl::External(url))
    } else {
        Ok(WebviewUrl::App(APP_ENTRY.into()))
    }
}

/// Build, register and show a new shell window, then re-enable import in the menu.
pub fn create_app_window<R: Runtime>(app: &AppHandle<R>) -> Result<WebviewWindow<R>, String> {
    let state = app.state::<ShellState<R>>();
    let label = new_window_label();
    let url = window_url(&state.config).inspect_err(|e| {
        log_error!("WINDOW", "cannot create {}: {}", label, e);
    })?;
    let prefs = state.sanctioned.clone();

    state.registry().issue(&label, prefs.clone());

    let nav_app = app.clone();
    let nav_label = label.clone();
    let nav_policy = state.navigation.clone();
    let popup_app = app.clone();
    let popup_label = label.clone();
    let popup_policy = state.navigation.clone();

    let built = WebviewWindowBuilder::new(app, &label, url)
        .title(WINDOW_TITLE)
        .inner_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .min_inner_size(WINDOW_WIDTH, WINDOW_HEIGHT)
        .resizable(false)
        .maximizable(false)
        .minimizable(true)
        .always_on_top(true)
        .shadow(true)
        .background_color(Color(255, 255, 255, 255))
        .initialization_script(prefs.preload)
        .devtools(prefs.devtools)
        .on_navigation(move |url| {
            let decision = nav_policy.for_navigation(url.as_str());
            enforce(&nav_app, &nav_label, url.as_str(), decision)
        })
        .on_new_window(move |url, _features| {
            let decision = popup_policy.for_new_window(url.as_str());
            enforce(&popup_app, &popup_label, url.as_str(), decision);
            NewWindowResponse::Deny
        })
        .build();

    let window = match built {
        Ok(window) => window,
        Err(e) => {
            state.registry().revoke(&label);
            log_error!("WINDOW", "failed to create {}: {}", label, e);
            return Err(e.to_string());
        }
    };

    let open = {
        let mut registry = state.registry();
        registry.track(window.clone());
        registry.len()
    };
    log_info!("WINDOW", "created {} ({} open)", label, open);

    #[cfg(debug_assertions)]
    {
        if state.config.dev_mode {
            window.open_devtools();
        }
    }

    menu::set_menu(app, true);
    Ok(window)
}
