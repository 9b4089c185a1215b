//! FILENAME: app/src-tauri/src/registry.rs
// PURPOSE: Window registry - the set of live shell windows and the operations
//          applied to all of them (broadcast, reposition, opacity).
// CONTEXT: Generic over `ShellWindow` so the bookkeeping is testable without a
//          native window. Callers snapshot the registry and release the lock
//          before touching windows; window calls can re-enter the event loop.

use serde_json::Value;
use std::collections::HashMap;

use crate::{log_debug, log_warn};

// ============================================================================
// WINDOW ABSTRACTION
// ============================================================================

/// The operations the shell performs on a top-level window.
pub trait ShellWindow: Clone {
    fn label(&self) -> &str;
    /// Move the window to screen origin (0, 0).
    fn reset_position(&self) -> Result<(), String>;
    fn set_opacity(&self, opacity: f64) -> Result<(), String>;
    /// Fire-and-forget delivery of a validated range document.
    fn send_range(&self, range: &Value) -> Result<(), String>;
}

/// Webview configuration a window is created with. Only webviews issued by the
/// window factory with exactly the sanctioned value may attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebPreferences {
    /// Initialization script injected before page scripts.
    pub preload: &'static str,
    pub devtools: bool,
    /// Remote (non-bundled) origins never get IPC access.
    pub remote_ipc: bool,
}

impl WebPreferences {
    pub fn sanctioned(preload: &'static str, dev_mode: bool) -> Self {
        WebPreferences {
            preload,
            devtools: dev_mode,
            remote_ipc: false,
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

pub struct WindowRegistry<W> {
    windows: Vec<W>,
    /// Labels handed out by the window factory, with the preferences used.
    issued: HashMap<String, WebPreferences>,
}

impl<W: ShellWindow> Default for WindowRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: ShellWindow> WindowRegistry<W> {
    pub fn new() -> Self {
        WindowRegistry {
            windows: Vec::new(),
            issued: HashMap::new(),
        }
    }

    /// Record that `label` is about to be built with `prefs`. Must happen before
    /// the webview exists so the attach guard can recognise it.
    pub fn issue(&mut self, label: &str, prefs: WebPreferences) {
        self.issued.insert(label.to_string(), prefs);
    }

    pub fn revoke(&mut self, label: &str) {
        self.issued.remove(label);
    }

    /// True only when `label` was issued with preferences equal to `sanctioned`.
    pub fn is_sanctioned(&self, label: &str, sanctioned: &WebPreferences) -> bool {
        self.issued.get(label) == Some(sanctioned)
    }

    /// Start tracking a window. A window with the same label is replaced.
    pub fn track(&mut self, window: W) {
        self.windows.retain(|w| w.label() != window.label());
        self.windows.push(window);
    }

    /// Stop tracking the window with `label` and forget its issued preferences.
    pub fn untrack(&mut self, label: &str) -> Option<W> {
        self.revoke(label);
        let index = self.windows.iter().position(|w| w.label() == label)?;
        Some(self.windows.remove(index))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.windows.iter().any(|w| w.label() == label)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.windows.iter().map(|w| w.label().to_string()).collect()
    }

    /// Owned copy of the tracked windows, in creation order.
    pub fn snapshot(&self) -> Vec<W> {
        self.windows.clone()
    }
}

// ============================================================================
// OPERATIONS ON ALL WINDOWS
// ============================================================================

/// Send `range` to every window. Failures are logged and skipped; nothing is
/// retried. Returns how many sends were accepted.
pub fn broadcast_range<W: ShellWindow>(windows: &[W], range: &Value) -> usize {
    let mut delivered = 0;
    for window in windows {
        match window.send_range(range) {
            Ok(()) => delivered += 1,
            Err(e) => log_debug!("RANGE", "add-range to {} failed: {}", window.label(), e),
        }
    }
    delivered
}

pub fn reset_positions<W: ShellWindow>(windows: &[W]) {
    for window in windows {
        if let Err(e) = window.reset_position() {
            log_warn!("DISPLAY", "reset position of {} failed: {}", window.label(), e);
        }
    }
}

pub fn apply_opacity<W: ShellWindow>(windows: &[W], opacity: f64) {
    for window in windows {
        if let Err(e) = window.set_opacity(opacity) {
            log_debug!("WINDOW", "set opacity on {} failed: {}", window.label(), e);
        }
    }
}
