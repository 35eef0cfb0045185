//! File I/O Commands
//!
//! This module handles loading a brand-exposure CSV into memory. It is
//! responsible for:
//! - Reading CSV files from disk (whole file, one shot)
//! - Caching metadata (name, size, row count)
//! - Storing the raw text in application state
//! - Seeding the chat transcript with a greeting
//! - Emitting events to notify the frontend of state changes
//!
//! # Why Raw Text?
//!
//! The suite keeps the CSV as raw text rather than a parsed table because
//! both reasoning-service modes embed the file verbatim in their prompts.
//! Parsed datasets are derived on demand by the dashboard commands.
//!
//! # Error Handling
//!
//! Uses a custom `CsvFileError` enum that implements `Serialize` so errors
//! can be sent to the frontend as JSON for user-friendly error messages.
//!
//! # Events Emitted
//!
//! - `app:loading` - When loading starts/ends
//! - `csv:loaded` - When the file is successfully loaded
//! - `csv:closed` - When the file is closed
//! - `app:error` - When an error occurs

use std::{fs, path::Path};
use tauri::{AppHandle, State};

use exposure_analytics::{ChatMessage, ChatRole};

use crate::events::{error_codes, AppEventEmitter};
use crate::state::{AppState, CsvInfo, LoadedCsv};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Custom error type for file operations.
///
/// Each variant represents a different failure mode with a descriptive message.
/// Implements `Serialize` so errors can be sent to the frontend as JSON.
#[derive(Debug, thiserror::Error)]
pub enum CsvFileError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to read file: {0}")]
    ReadError(String),

    #[error("Failed to get file metadata: {0}")]
    MetadataError(String),
}

/// Manual `Serialize` implementation for CsvFileError.
///
/// Tauri requires command return types to be serializable. We serialize
/// errors as simple strings containing the error message so the frontend
/// can display them in toast notifications.
impl serde::Serialize for CsvFileError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl CsvFileError {
    fn error_code(&self) -> &'static str {
        match self {
            CsvFileError::NotFound(_) => error_codes::FILE_NOT_FOUND,
            CsvFileError::ReadError(_) => error_codes::FILE_READ_ERROR,
            CsvFileError::MetadataError(_) => error_codes::FILE_METADATA_ERROR,
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Counts the data rows in a CSV text: total non-blank lines minus the header.
fn count_data_rows(text: &str) -> usize {
    text.trim().lines().count().saturating_sub(1)
}

/// Builds the greeting that seeds a fresh chat transcript after an upload.
fn greeting_for(file_name: &str) -> ChatMessage {
    ChatMessage {
        role: ChatRole::Model,
        content: format!(
            "File \"{}\" loaded. How can I help you analyze this data?",
            file_name
        ),
    }
}

// ============================================================================
// TAURI COMMANDS
// ============================================================================

/// Loads a CSV file into application state and returns file metadata.
///
/// This is the main command for opening a file. It:
/// 1. Emits `app:loading` event (loading started)
/// 2. Reads file metadata (size)
/// 3. Reads the full file text
/// 4. Stores the raw text in application state
/// 5. Resets the chat transcript and seeds it with a greeting
/// 6. Emits `csv:loaded` event with CsvInfo
/// 7. Emits `app:loading` event (loading ended)
/// 8. Returns `CsvInfo` for the UI to render
///
/// # Events Emitted
///
/// - `app:loading { is_loading: true, message: "Reading CSV..." }` - On start
/// - `csv:loaded { csv_info: CsvInfo }` - On success
/// - `app:loading { is_loading: false, message: null }` - On complete
/// - `app:error { code, message }` - On error (before returning Err)
///
/// # State Updates
///
/// Loading a new file replaces the previous session wholesale: the old
/// CSV text, the chat transcript, and any best-frame result on the
/// frontend all refer to the previous file and are discarded.
#[tauri::command]
pub async fn load_csv_file(
    app: AppHandle,
    path: String,
    state: State<'_, AppState>,
) -> Result<CsvInfo, CsvFileError> {
    app.emit_loading(true, Some("Reading CSV..."));

    let file_path = Path::new(&path);

    if !file_path.exists() {
        let error = CsvFileError::NotFound(file_path.display().to_string());
        app.emit_error(error.error_code(), &error.to_string());
        app.emit_loading(false, None);
        return Err(error);
    }

    // File size for display in the header bar
    let metadata = fs::metadata(file_path).map_err(|e| {
        let error = CsvFileError::MetadataError(e.to_string());
        app.emit_error(error.error_code(), &error.to_string());
        app.emit_loading(false, None);
        error
    })?;

    // Extract just the filename (without path) for display
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    // Whole file in one read; exports are small enough that streaming
    // would buy nothing
    let text = fs::read_to_string(file_path).map_err(|e| {
        let error = CsvFileError::ReadError(e.to_string());
        app.emit_error(error.error_code(), &error.to_string());
        app.emit_loading(false, None);
        error
    })?;

    let csv_info = CsvInfo {
        path: path.clone(),
        name: file_name.clone(),
        size_bytes: metadata.len(),
        row_count: count_data_rows(&text),
    };

    // Store the CSV in application state
    // Using a block to limit the scope of the write lock
    {
        let mut csv_guard = state.csv.write();
        *csv_guard = Some(LoadedCsv {
            text,
            info: csv_info.clone(),
        });
    }

    // A new file invalidates the old conversation; start over with a greeting
    {
        let mut transcript = state.chat_transcript.write();
        transcript.clear();
        transcript.push(greeting_for(&file_name));
    }

    app.emit_csv_loaded(csv_info.clone());
    app.emit_loading(false, None);

    Ok(csv_info)
}

/// Returns metadata for the currently loaded file, if any.
///
/// This command allows the frontend to query file info without
/// re-loading the file. Useful for refreshing UI state.
///
/// # Note
///
/// This is a synchronous command (not `async`) because it only
/// reads from memory with no I/O operations.
#[tauri::command]
pub fn get_csv_info(state: State<'_, AppState>) -> Option<CsvInfo> {
    let guard = state.csv.read();
    guard.as_ref().map(|loaded| loaded.info.clone())
}

/// Closes the current file and clears the session.
///
/// Drops the CSV text and the chat transcript. Emits `csv:closed` so
/// every view can return to its empty state.
#[tauri::command]
pub fn close_csv(app: AppHandle, state: State<'_, AppState>) {
    {
        let mut csv_guard = state.csv.write();
        *csv_guard = None;
    }
    {
        let mut transcript = state.chat_transcript.write();
        transcript.clear();
    }

    app.emit_csv_closed();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_data_rows_excludes_header() {
        assert_eq!(count_data_rows("h1,h2\na,b\nc,d\n"), 2);
    }

    #[test]
    fn test_count_data_rows_header_only() {
        assert_eq!(count_data_rows("h1,h2\n"), 0);
    }

    #[test]
    fn test_count_data_rows_empty() {
        assert_eq!(count_data_rows(""), 0);
    }

    #[test]
    fn test_greeting_names_the_file() {
        let msg = greeting_for("final_match.csv");
        assert_eq!(msg.role, ChatRole::Model);
        assert!(msg.content.contains("\"final_match.csv\""));
    }
}
