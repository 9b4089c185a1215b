//! FILENAME: app/src-tauri/src/range_import.rs
// PURPOSE: Load a .range file and hand it to every open window.
// CONTEXT: Entry point for the macOS open-file event, launch arguments and the
//          open dialog. Read/parse/validation failures all collapse into one
//          generic alert; the detail only goes to the log.

use std::path::{Path, PathBuf};

use range_file::RangeFileError;
use serde_json::Value;
use tauri::{AppHandle, Manager, Runtime};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::registry::{broadcast_range, ShellWindow};
use crate::{log_debug, log_enter, log_exit, log_info, ShellState};

/// Event carrying a validated range document to the UI.
pub const ADD_RANGE_EVENT: &str = "add-range";

pub const INVALID_RANGE_TITLE: &str = "Invalid Range File";
pub const INVALID_RANGE_MESSAGE: &str =
    "The range file is not valid. Please try re-exporting the range file from the range builder";

// ============================================================================
// ALERT
// ============================================================================

/// User-facing report for a rejected range file.
pub trait RangeAlert {
    fn invalid_range_file(&self);
}

impl<R: Runtime> RangeAlert for AppHandle<R> {
    fn invalid_range_file(&self) {
        self.dialog()
            .message(INVALID_RANGE_MESSAGE)
            .title(INVALID_RANGE_TITLE)
            .kind(MessageDialogKind::Error)
            .buttons(MessageDialogButtons::Ok)
            .show(|_| {});
    }
}

// ============================================================================
// LOAD + DELIVER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeDelivery {
    /// Number of windows the document was addressed to.
    Broadcast(usize),
    Rejected,
}

/// Read, parse and validate without blocking the event loop.
pub async fn load_range(path: &Path) -> Result<Value, RangeFileError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RangeFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    range_file::parse_range(&text)
}

/// Broadcast a loaded document or raise the alert. Exactly one of the two happens.
pub fn deliver_range<W, A>(
    path: &Path,
    outcome: Result<Value, RangeFileError>,
    windows: &[W],
    alert: &A,
) -> RangeDelivery
where
    W: ShellWindow,
    A: RangeAlert,
{
    match outcome {
        Ok(range) => {
            let delivered = broadcast_range(windows, &range);
            log_info!(
                "RANGE",
                "{} sent to {}/{} window(s)",
                path.display(),
                delivered,
                windows.len()
            );
            RangeDelivery::Broadcast(windows.len())
        }
        Err(e) => {
            log_debug!("RANGE", "rejected {} ({}): {}", path.display(), e.kind(), e);
            alert.invalid_range_file();
            RangeDelivery::Rejected
        }
    }
}

/// Start loading `path` in the background. The windows tracked when the load
/// finishes receive the document; nothing is awaited.
pub fn handle_range_file<R: Runtime>(app: &AppHandle<R>, path: PathBuf) {
    log_enter!("RANGE", "handle_range_file", "{}", path.display());
    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        let outcome = load_range(&path).await;
        let windows = app.state::<ShellState<R>>().windows_snapshot();
        let delivery = deliver_range(&path, outcome, &windows, &app);
        log_exit!("RANGE", "handle_range_file", "{:?}", delivery);
    });
}
