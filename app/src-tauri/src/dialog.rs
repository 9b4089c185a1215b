//! FILENAME: app/src-tauri/src/dialog.rs
// PURPOSE: "Open Range(s)" file picker with a single-flight guard.
// CONTEXT: Triggered from the File menu and the `open_range_dialog` command.
//          A request while a picker is already up is dropped, not queued.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use range_file::RANGE_EXTENSION;
use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, FilePath};

use crate::range_import::handle_range_file;
use crate::{log_debug, log_info, ShellState};

pub const DIALOG_TITLE: &str = "Launch Range Assistant";
pub const FILTER_NAME: &str = "Range Files";

// ============================================================================
// SINGLE-FLIGHT GATE
// ============================================================================

#[derive(Debug, Default)]
pub struct DialogGate {
    in_flight: Arc<AtomicBool>,
}

/// Held for as long as a picker is open. Dropping it (on any path, including
/// unwinding) reopens the gate.
#[derive(Debug)]
pub struct DialogGuard {
    in_flight: Arc<AtomicBool>,
}

impl DialogGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when a picker is already in flight.
    pub fn try_acquire(&self) -> Option<DialogGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| DialogGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

impl Drop for DialogGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

// ============================================================================
// PICKER
// ============================================================================

/// Paths chosen in the picker; cancellation yields none.
pub fn selected_paths(selection: Option<Vec<FilePath>>) -> Vec<PathBuf> {
    selection
        .unwrap_or_default()
        .into_iter()
        .filter_map(|file| file.into_path().ok())
        .collect()
}

/// Show the multi-select range picker unless one is already open. Every
/// selected file is loaded independently; loads are not awaited here.
pub fn show_open_file_dialog(app: &AppHandle) {
    let state = app.state::<ShellState>();
    let Some(guard) = state.dialog.try_acquire() else {
        log_debug!("DIALOG", "picker already open, request dropped");
        return;
    };

    let handle = app.clone();
    app.dialog()
        .file()
        .set_title(DIALOG_TITLE)
        .add_filter(FILTER_NAME, &[RANGE_EXTENSION])
        .pick_files(move |selection| {
            let _guard = guard;
            let paths = selected_paths(selection);
            if paths.is_empty() {
                log_debug!("DIALOG", "picker cancelled");
                return;
            }
            log_info!("DIALOG", "{} range file(s) selected", paths.len());
            for path in paths {
                handle_range_file(&handle, path);
            }
        });
}
