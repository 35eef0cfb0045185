//! Application State Management
//!
//! All session data lives here in Rust; the frontend is purely a renderer.
//! The session is intentionally ephemeral: nothing in this module is
//! persisted to disk, and the reasoning-service credential in particular
//! exists only for the lifetime of the process.
//!
//! # Thread Safety
//!
//! Every field is wrapped in `RwLock` from `parking_lot` (faster than std),
//! allowing safe concurrent access from multiple Tauri command handlers.
//! The loaded CSV itself is immutable once stored; commands replace it
//! wholesale on a new upload.

use exposure_analytics::ChatMessage;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

// ============================================================================
// TABS
// ============================================================================

/// The four views of the suite. Tab dispatch is a tagged-variant state
/// machine: exactly one tab is active and each command group serves one
/// variant.
///
/// # Mirrors
///
/// TypeScript: `types/index.ts::Tab`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    /// Static marketing/overview page, no data dependencies.
    #[default]
    Analytics,
    /// CSV chatbot backed by the free-text reasoning mode.
    Chat,
    /// Aggregate charts derived from the loaded CSV.
    Dashboard,
    /// Best-frame finder backed by the structured reasoning mode.
    BestFrame,
}

// ============================================================================
// CSV SESSION DATA
// ============================================================================

/// Metadata about the loaded CSV, for display in the UI.
///
/// # Mirrors
///
/// TypeScript: `types/index.ts::CsvInfo`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvInfo {
    /// Full path the file was loaded from.
    pub path: String,
    /// Just the filename (e.g. "final_match.csv").
    pub name: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (total lines minus the header).
    pub row_count: usize,
}

/// The uploaded CSV: raw text plus cached metadata.
///
/// The raw text is kept verbatim because both reasoning-service modes
/// embed it unmodified in their prompts; parsed datasets are derived on
/// demand and never stored.
pub struct LoadedCsv {
    /// Full file contents, read into memory in one shot (no streaming).
    pub text: String,
    /// Cached metadata, computed once at load time.
    pub info: CsvInfo,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Global application state, managed by Tauri and injected into command
/// handlers via the `State` extractor.
///
/// # Session-Only Storage
///
/// Everything here is in-memory only:
/// - `credential` - reasoning-service API key, never written to disk
/// - `chat_transcript` - cleared when a new CSV is loaded
/// - pending flags - gate overlapping reasoning-service calls per view
pub struct AppState {
    /// The uploaded CSV, or `None` before the first upload.
    pub csv: RwLock<Option<LoadedCsv>>,

    /// Reasoning-service credential. `None` or blank short-circuits any
    /// reasoning call before dispatch.
    pub credential: RwLock<Option<String>>,

    /// Currently active tab.
    pub active_tab: RwLock<Tab>,

    /// Chat transcript for the CSV chatbot view.
    pub chat_transcript: RwLock<Vec<ChatMessage>>,

    /// True while a chatbot call is outstanding. New submissions are
    /// rejected until the flag clears; it is cleared unconditionally on
    /// completion, success or failure, so the view cannot get stuck.
    pub chat_pending: RwLock<bool>,

    /// Same gate for the best-frame finder view.
    pub selection_pending: RwLock<bool>,
}

impl AppState {
    /// Creates a fresh session with nothing loaded.
    pub fn new() -> Self {
        Self {
            csv: RwLock::new(None),
            credential: RwLock::new(None),
            active_tab: RwLock::new(Tab::default()),
            chat_transcript: RwLock::new(Vec::new()),
            chat_pending: RwLock::new(false),
            selection_pending: RwLock::new(false),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
