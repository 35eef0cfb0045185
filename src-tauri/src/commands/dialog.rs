//! Native File Dialog Commands
//!
//! This module provides commands for opening native OS file dialogs.
//! Uses the `tauri-plugin-dialog` for cross-platform file picking.
//!
//! # Permissions
//!
//! The dialog plugin requires permissions in `capabilities/default.json`:
//! ```json
//! "permissions": ["dialog:default", "dialog:allow-open"]
//! ```

use tauri_plugin_dialog::DialogExt;

/// Opens a native file dialog filtered for CSV files.
///
/// This command displays the OS-native file picker dialog with a filter
/// that only shows CSV files.
///
/// # Returns
///
/// - `Some(String)` - The full path to the selected file
/// - `None` - If the user cancelled the dialog
///
/// # Frontend Usage
///
/// ```typescript
/// const filePath = await invoke<string | null>("open_csv_dialog");
/// if (filePath) {
///     const info = await invoke("load_csv_file", { path: filePath });
/// }
/// ```
///
/// # Notes
///
/// - Uses `blocking_pick_file` which blocks the thread until dialog closes
/// - This is fine because Tauri commands run in a thread pool, not the main thread
/// - The `async` keyword is present for Tauri command compatibility
#[tauri::command]
pub async fn open_csv_dialog(app: tauri::AppHandle) -> Option<String> {
    let file_path = app
        .dialog()
        .file()
        .add_filter("CSV Files", &["csv"])
        // Block until the user makes a selection or cancels
        .blocking_pick_file();

    file_path.map(|p| p.to_string())
}
