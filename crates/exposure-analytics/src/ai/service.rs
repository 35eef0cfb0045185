//! Reasoning-service trait for abstracting LLM interactions.
//!
//! This module defines the [`ReasoningService`] trait that the Tauri shell
//! programs against. Two operations cover everything the app delegates to
//! the hosted model, so core logic can be tested against a deterministic
//! stub instead of a live network dependency.

use crate::types::BestFrameSelection;
use anyhow::Result;

/// Capability interface over the external reasoning service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so calls can be dispatched from
/// `spawn_blocking` worker threads.
///
/// # Error Handling
///
/// Free-text mode reports failures via `anyhow::Result`; the caller
/// degrades them to an inline message. Structured mode must never leak an
/// error past this boundary for response-shape problems: a response the
/// service could not produce or validate is `Ok(None)`.
pub trait ReasoningService: Send + Sync {
    /// Answer a free-form question about the CSV data.
    ///
    /// A single best-effort call per user turn; no retries.
    ///
    /// # Arguments
    ///
    /// * `csv_text` - The full raw CSV text, embedded verbatim in the prompt
    /// * `question` - The user's question
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails or produces no content.
    fn answer_question(&self, csv_text: &str, question: &str) -> Result<String>;

    /// Pick the single best frame for a brand per the fixed rubric.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(selection))` when the service returned a structurally
    ///   valid `{frameNumber, reasoning}` object
    /// - `Ok(None)` on any transport, parse, or validation failure
    fn select_best_frame(&self, csv_text: &str, brand: &str) -> Result<Option<BestFrameSelection>>;

    /// Backend name for logging and debugging.
    fn name(&self) -> &str;

    /// Model identifier, if the backend exposes one.
    fn model(&self) -> Option<&str> {
        None
    }
}
