//! Event System for Rust → Frontend Communication
//!
//! This module defines the event system that allows Rust to push state changes
//! to the TypeScript frontend. This implements the "hybrid" communication pattern:
//! - Events: Rust pushes notifications when state changes
//! - Commands: Frontend pulls data when needed (e.g., `get_dashboard_data`)
//!
//! # Event Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         RUST BACKEND                             │
//! │                                                                  │
//! │   load_csv_file() ──► emit("csv:loaded", CsvLoadedPayload)       │
//! │   close_csv() ──────► emit("csv:closed", {})                     │
//! │   operations ───────► emit("app:loading", LoadingPayload)        │
//! │   errors ───────────► emit("app:error", ErrorPayload)            │
//! │   ask_question() ───► emit("chat:response", ChatMessage)         │
//! │   set_active_tab() ─► emit("settings:tab-changed", Tab)          │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Why Events + Commands (Hybrid)?
//!
//! - **Events** are great for notifications (small payloads, fire-and-forget)
//! - **Commands** are better for large data transfers (dashboard aggregates)
//! - The frontend subscribes to events to know *when* to fetch, then uses
//!   commands to fetch the actual data

use exposure_analytics::ChatMessage;
use serde::Serialize;
use tauri::{AppHandle, Emitter};

use crate::state::{CsvInfo, Tab};

// ============================================================================
// EVENT NAME CONSTANTS
// ============================================================================

/// Event emitted when a CSV is successfully loaded.
/// Payload: `CsvLoadedPayload` containing `CsvInfo`
pub const EVENT_CSV_LOADED: &str = "csv:loaded";

/// Event emitted when the CSV is closed.
/// Payload: Empty (unit type serializes to `null`)
pub const EVENT_CSV_CLOSED: &str = "csv:closed";

/// Event emitted when loading state changes.
/// Payload: `LoadingPayload` with status and optional message
pub const EVENT_LOADING: &str = "app:loading";

/// Event emitted when an error occurs.
/// Payload: `ErrorPayload` with error code and message
pub const EVENT_ERROR: &str = "app:error";

/// Event emitted when the chatbot produces a reply.
/// Payload: `ChatMessage` (the model turn)
pub const EVENT_CHAT_RESPONSE: &str = "chat:response";

/// Event emitted when the active tab changes.
/// Payload: `Tab` enum value
pub const EVENT_TAB_CHANGED: &str = "settings:tab-changed";

// ============================================================================
// EVENT PAYLOADS
// ============================================================================

/// Payload for the `csv:loaded` event.
///
/// Contains full file metadata so the frontend can update its header
/// without needing a separate `get_csv_info` call.
#[derive(Debug, Clone, Serialize)]
pub struct CsvLoadedPayload {
    /// File metadata (path, name, size, row count)
    pub csv_info: CsvInfo,
}

/// Payload for the `app:loading` event.
///
/// Indicates whether a long-running operation is in progress.
/// The frontend can use this to show loading indicators.
#[derive(Debug, Clone, Serialize)]
pub struct LoadingPayload {
    /// Whether loading is currently in progress
    pub is_loading: bool,
    /// Optional message describing what's happening (e.g., "Reading CSV...")
    pub message: Option<String>,
}

/// Payload for the `app:error` event.
///
/// Contains structured error information for display in the UI.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    /// Error code for programmatic handling (e.g., "MISSING_COLUMNS")
    pub code: String,
    /// Human-readable error message for display
    pub message: String,
}

// ============================================================================
// EVENT EMISSION HELPERS
// ============================================================================

/// Helper trait for emitting events with a cleaner API.
///
/// This trait extends `AppHandle` with convenient methods for emitting
/// our custom events. Using a trait keeps the code clean and allows
/// for easy testing/mocking.
///
/// # Usage
///
/// ```rust,ignore
/// use crate::events::AppEventEmitter;
///
/// fn some_command(app: AppHandle) {
///     app.emit_csv_loaded(csv_info);
///     app.emit_loading(true, Some("Reading CSV..."));
///     app.emit_error("CSV_READ_ERROR", "Permission denied");
/// }
/// ```
pub trait AppEventEmitter {
    /// Emit the `csv:loaded` event with file metadata.
    fn emit_csv_loaded(&self, csv_info: CsvInfo);

    /// Emit the `csv:closed` event.
    fn emit_csv_closed(&self);

    /// Emit the `app:loading` event with loading state.
    fn emit_loading(&self, is_loading: bool, message: Option<&str>);

    /// Emit the `app:error` event with error details.
    fn emit_error(&self, code: &str, message: &str);

    /// Emit the `chat:response` event with the model's reply.
    fn emit_chat_response(&self, message: ChatMessage);

    /// Emit the `settings:tab-changed` event with the new active tab.
    fn emit_tab_changed(&self, tab: Tab);
}

impl AppEventEmitter for AppHandle {
    fn emit_csv_loaded(&self, csv_info: CsvInfo) {
        let payload = CsvLoadedPayload { csv_info };
        if let Err(e) = self.emit(EVENT_CSV_LOADED, payload) {
            eprintln!("Failed to emit csv:loaded event: {}", e);
        }
    }

    fn emit_csv_closed(&self) {
        // Emit with unit type () which serializes to null
        if let Err(e) = self.emit(EVENT_CSV_CLOSED, ()) {
            eprintln!("Failed to emit csv:closed event: {}", e);
        }
    }

    fn emit_loading(&self, is_loading: bool, message: Option<&str>) {
        let payload = LoadingPayload {
            is_loading,
            message: message.map(String::from),
        };
        if let Err(e) = self.emit(EVENT_LOADING, payload) {
            eprintln!("Failed to emit app:loading event: {}", e);
        }
    }

    fn emit_error(&self, code: &str, message: &str) {
        let payload = ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
        };
        if let Err(e) = self.emit(EVENT_ERROR, payload) {
            eprintln!("Failed to emit app:error event: {}", e);
        }
    }

    fn emit_chat_response(&self, message: ChatMessage) {
        if let Err(e) = self.emit(EVENT_CHAT_RESPONSE, message) {
            eprintln!("Failed to emit chat:response event: {}", e);
        }
    }

    fn emit_tab_changed(&self, tab: Tab) {
        if let Err(e) = self.emit(EVENT_TAB_CHANGED, tab) {
            eprintln!("Failed to emit settings:tab-changed event: {}", e);
        }
    }
}

// ============================================================================
// ERROR CODES
// ============================================================================

/// Standard error codes for consistent error handling across the app.
///
/// Using constants instead of an enum allows for easier serialization
/// and extension without breaking changes. Analytics-core errors carry
/// their own codes via `AnalyticsError::error_code`; the codes here
/// cover the shell's file and settings surface.
pub mod error_codes {
    // -------------------------------------------------------------------------
    // File Error Codes
    // -------------------------------------------------------------------------

    /// File was not found at the specified path
    pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";

    /// Failed to read the file (I/O error, permissions, encoding)
    pub const FILE_READ_ERROR: &str = "FILE_READ_ERROR";

    /// Failed to get file metadata (size, etc.)
    pub const FILE_METADATA_ERROR: &str = "FILE_METADATA_ERROR";

    // -------------------------------------------------------------------------
    // Settings Error Codes
    // -------------------------------------------------------------------------

    /// Reasoning-service credential is blank or malformed
    pub const SETTINGS_INVALID_CREDENTIAL: &str = "INVALID_CREDENTIAL";
}
