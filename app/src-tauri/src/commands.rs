//! FILENAME: app/src-tauri/src/commands.rs
// PURPOSE: Commands the UI (via the preload bridge) can invoke.

use tauri::{AppHandle, State};

use crate::config::ShellConfig;
use crate::dialog::show_open_file_dialog;
use crate::navigation::open_external;
use crate::window::create_app_window;
use crate::ShellState;

/// Same as File > Open Range.
#[tauri::command]
pub fn open_range_dialog(app: AppHandle) {
    show_open_file_dialog(&app);
}

/// Same as File > New Window. Async so window creation does not run inside
/// the synchronous IPC handler.
#[tauri::command]
pub async fn open_new_window(app: AppHandle) -> Result<String, String> {
    create_app_window(&app).map(|window| window.label().to_string())
}

#[tauri::command]
pub fn open_range_builder(app: AppHandle, state: State<ShellState>) {
    open_external(&app, &state.config.builder_url);
}

#[tauri::command]
pub fn get_shell_config(state: State<ShellState>) -> ShellConfig {
    state.config.clone()
}
