//! FILENAME: app/src-tauri/src/navigation.rs
// PURPOSE: Navigation, new-window and webview-attach guards.
// CONTEXT: Windows only ever show the bundled UI. Links into the range builder
//          are sent to the external browser; every other navigation is dropped.

use tauri::plugin::{Builder as PluginBuilder, TauriPlugin};
use tauri::{AppHandle, Manager, Runtime, Url, Wry};
use tauri_plugin_opener::OpenerExt;

use crate::config::ShellConfig;
use crate::{log_debug, log_info, log_warn, ShellState};

/// Origins the webview itself serves the bundled UI from.
const BUNDLED_ORIGINS: [&str; 3] = [
    "tauri://localhost",
    "http://tauri.localhost",
    "https://tauri.localhost",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// The shell's own content; let the webview load it.
    Allow,
    /// Cancel and open this URL in the default browser.
    OpenExternal(String),
    Block,
}

#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    app_origins: Vec<String>,
    builder_match_prefix: String,
    builder_url: String,
}

/// `scheme://host[:port]` for absolute URLs. Custom schemes have an opaque
/// `Url::origin`, so this is built by hand.
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    })
}

impl NavigationPolicy {
    pub fn new(config: &ShellConfig) -> Self {
        let mut app_origins: Vec<String> = BUNDLED_ORIGINS.iter().map(|o| o.to_string()).collect();
        if config.dev_mode {
            if let Some(origin) = origin_of(&config.dev_server_url) {
                app_origins.push(origin);
            }
        }
        NavigationPolicy {
            app_origins,
            builder_match_prefix: config.builder_match_prefix.clone(),
            builder_url: config.builder_url.clone(),
        }
    }

    fn is_app_content(&self, url: &str) -> bool {
        origin_of(url)
            .map(|origin| self.app_origins.iter().any(|o| *o == origin))
            .unwrap_or(false)
    }

    /// In-window navigation. Any page on the shell's own origins passes, not
    /// just the initial load; everything else is cancelled.
    pub fn for_navigation(&self, url: &str) -> NavigationDecision {
        if self.is_app_content(url) {
            NavigationDecision::Allow
        } else {
            self.for_new_window(url)
        }
    }

    /// `window.open` and `target=_blank`. Never creates a window.
    pub fn for_new_window(&self, url: &str) -> NavigationDecision {
        if url.starts_with(&self.builder_match_prefix) {
            NavigationDecision::OpenExternal(self.builder_url.clone())
        } else {
            NavigationDecision::Block
        }
    }
}

pub fn open_external<R: Runtime>(app: &AppHandle<R>, url: &str) {
    match app.opener().open_url(url, None::<&str>) {
        Ok(()) => log_info!("NAV", "opened {} externally", url),
        Err(e) => log_warn!("NAV", "external open of {} failed: {}", url, e),
    }
}

/// Apply a decision. Returns whether the webview may proceed.
pub fn enforce<R: Runtime>(app: &AppHandle<R>, label: &str, url: &str, decision: NavigationDecision) -> bool {
    match decision {
        NavigationDecision::Allow => true,
        NavigationDecision::OpenExternal(target) => {
            log_debug!("NAV", "{}: redirecting {} to browser", label, url);
            open_external(app, &target);
            false
        }
        NavigationDecision::Block => {
            log_debug!("NAV", "{}: blocked {}", label, url);
            false
        }
    }
}

// ============================================================================
// ATTACH GUARD
// ============================================================================

/// Destroys any webview that the window factory did not issue with the
/// sanctioned preferences.
pub fn attach_guard() -> TauriPlugin<Wry> {
    PluginBuilder::new("attach-guard")
        .on_webview_ready(|webview| {
            let state = webview.state::<ShellState>();
            let label = webview.label().to_string();
            if state.attach_allowed(&label) {
                log_debug!("NAV", "webview {} attached", label);
                return;
            }
            log_warn!("NAV", "unsanctioned webview {} rejected", label);
            if let Err(e) = webview.window().destroy() {
                log_warn!("NAV", "destroying {} failed: {}", label, e);
            }
        })
        .build()
}
