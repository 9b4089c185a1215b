//! FILENAME: app/src-tauri/src/display.rs
// PURPOSE: Primary-display tracking. When the primary display changes (monitor
//          unplugged, arrangement changed) every window is moved back to (0, 0)
//          so none is stranded off-screen.
// CONTEXT: Tauri has no display-added/removed event. A watcher compares the
//          monitor list on an interval; window scale-factor changes also
//          trigger a check.

use serde::Serialize;
use tauri::{AppHandle, Manager, Monitor, Runtime};

use crate::registry::reset_positions;
use crate::{log_debug, log_info, log_warn, ShellState};

// ============================================================================
// DESCRIPTORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayDescriptor {
    /// Monitor name, or its geometry when the platform reports no name.
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub scale_factor: f64,
}

impl DisplayDescriptor {
    pub fn new(name: Option<&str>, x: i32, y: i32, width: u32, height: u32, scale_factor: f64) -> Self {
        let id = match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{}x{}@{},{}", width, height, x, y),
        };
        DisplayDescriptor { id, x, y, width, height, scale_factor }
    }

    pub fn from_monitor(monitor: &Monitor) -> Self {
        let position = monitor.position();
        let size = monitor.size();
        DisplayDescriptor::new(
            monitor.name().map(|n| n.as_str()),
            position.x,
            position.y,
            size.width,
            size.height,
            monitor.scale_factor(),
        )
    }
}

/// Order-independent fingerprint of the attached displays.
pub fn topology_signature(displays: &[DisplayDescriptor]) -> String {
    let mut parts: Vec<String> = displays
        .iter()
        .map(|d| format!("{}:{}x{}@{},{}", d.id, d.width, d.height, d.x, d.y))
        .collect();
    parts.sort();
    parts.join("|")
}

// ============================================================================
// TRACKER
// ============================================================================

#[derive(Debug, Default)]
pub struct DisplayTracker {
    primary: Option<DisplayDescriptor>,
    topology: Option<String>,
}

impl DisplayTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<&DisplayDescriptor> {
        self.primary.as_ref()
    }

    /// Cache the primary display seen at startup.
    pub fn prime(&mut self, primary: Option<DisplayDescriptor>, topology: String) {
        self.primary = primary;
        self.topology = Some(topology);
    }

    /// Record the current topology; true when it differs from the last one seen.
    pub fn topology_changed(&mut self, signature: String) -> bool {
        if self.topology.as_deref() == Some(signature.as_str()) {
            return false;
        }
        self.topology = Some(signature);
        true
    }

    /// Compare `current` against the cached primary. Returns true when the
    /// identity changed and windows must be repositioned. A missing reading
    /// keeps the cache.
    pub fn reconcile(&mut self, current: Option<DisplayDescriptor>) -> bool {
        let Some(current) = current else {
            return false;
        };
        match &self.primary {
            Some(cached) if cached.id == current.id => false,
            Some(_) => {
                self.primary = Some(current);
                true
            }
            None => {
                self.primary = Some(current);
                false
            }
        }
    }
}

// ============================================================================
// NATIVE QUERIES
// ============================================================================

fn query_primary<R: Runtime>(app: &AppHandle<R>) -> Option<DisplayDescriptor> {
    match app.primary_monitor() {
        Ok(monitor) => monitor.as_ref().map(DisplayDescriptor::from_monitor),
        Err(e) => {
            log_warn!("DISPLAY", "primary monitor query failed: {}", e);
            None
        }
    }
}

fn query_all<R: Runtime>(app: &AppHandle<R>) -> Vec<DisplayDescriptor> {
    match app.available_monitors() {
        Ok(monitors) => monitors.iter().map(DisplayDescriptor::from_monitor).collect(),
        Err(e) => {
            log_warn!("DISPLAY", "monitor list query failed: {}", e);
            Vec::new()
        }
    }
}

/// Cache the startup display layout.
pub fn prime_display_cache<R: Runtime>(app: &AppHandle<R>) {
    let primary = query_primary(app);
    let signature = topology_signature(&query_all(app));
    log_info!(
        "DISPLAY",
        "primary display {}",
        primary.as_ref().map(|d| d.id.as_str()).unwrap_or("<none>")
    );
    app.state::<ShellState<R>>().displays().prime(primary, signature);
}

/// Re-query the primary display; on an identity change move all windows to the origin.
pub fn handle_display_change<R: Runtime>(app: &AppHandle<R>) {
    let current = query_primary(app);
    let state = app.state::<ShellState<R>>();
    let changed = state.displays().reconcile(current);
    if !changed {
        return;
    }
    let windows = state.windows_snapshot();
    log_info!("DISPLAY", "primary display changed, resetting {} window(s)", windows.len());
    reset_positions(&windows);
}

/// Run `handle_display_change` when a display was added or removed.
pub fn check_topology<R: Runtime>(app: &AppHandle<R>) {
    let displays = query_all(app);
    if displays.is_empty() {
        return;
    }
    let changed = app
        .state::<ShellState<R>>()
        .displays()
        .topology_changed(topology_signature(&displays));
    if changed {
        log_debug!("DISPLAY", "display topology changed ({} attached)", displays.len());
        handle_display_change(app);
    }
}

/// Poll the monitor list for the lifetime of the app. Checks run on the main thread.
pub fn start_display_watcher<R: Runtime>(app: &AppHandle<R>) {
    let interval = app.state::<ShellState<R>>().config.display_poll_interval();
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let handle = app.clone();
            if let Err(e) = app.run_on_main_thread(move || check_topology(&handle)) {
                log_warn!("DISPLAY", "watcher stopped: {}", e);
                break;
            }
        }
    });
}
