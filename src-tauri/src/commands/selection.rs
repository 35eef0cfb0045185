//! Best-Frame Selection Commands
//!
//! The best-frame finder: given a brand, asks the reasoning service for
//! the single most advertiser-friendly frame in the loaded CSV, as a
//! structured `{ frameNumber, reasoning }` payload.
//!
//! # Failure Shape
//!
//! The analytics core already absorbs every service-side failure into
//! `Ok(None)` (see `GeminiClient::select_best_frame`), so this command
//! only distinguishes "got a selection" from "no usable selection". The
//! latter is surfaced as a retryable error string; the view shows it
//! inline next to the brand picker.

use tauri::State;

use exposure_analytics::ai::{GeminiClient, ReasoningService};
use exposure_analytics::{AnalyticsError, BestFrameSelection};

use crate::state::AppState;

/// Asks the reasoning service for the best exposure frame for `brand`.
///
/// # Returns
///
/// - `Ok(BestFrameSelection)` - a validated `{ frameNumber, reasoning }`
///   selection
/// - `Err(AnalyticsError)` - pre-flight failure (`NO_DATA_LOADED`,
///   `MISSING_CREDENTIAL`, `REQUEST_PENDING`) or `REASONING_SERVICE`
///   when the service produced no usable selection
#[tauri::command]
pub async fn find_best_frame(
    brand: String,
    state: State<'_, AppState>,
) -> Result<BestFrameSelection, AnalyticsError> {
    let csv_text = {
        let guard = state.csv.read();
        guard
            .as_ref()
            .map(|loaded| loaded.text.clone())
            .ok_or(AnalyticsError::NoDataLoaded)?
    };

    let api_key = {
        let guard = state.credential.read();
        match guard.as_deref() {
            Some(key) if !key.trim().is_empty() => key.to_string(),
            _ => return Err(AnalyticsError::MissingCredential),
        }
    };

    {
        let mut pending = state.selection_pending.write();
        if *pending {
            return Err(AnalyticsError::RequestPending);
        }
        *pending = true;
    }

    let result = tauri::async_runtime::spawn_blocking(move || {
        let client = GeminiClient::new(api_key)?;
        client.select_best_frame(&csv_text, &brand)
    })
    .await;

    {
        let mut pending = state.selection_pending.write();
        *pending = false;
    }

    match result {
        Ok(Ok(Some(selection))) => Ok(selection),
        Ok(Ok(None)) => Err(AnalyticsError::ReasoningService(
            "The analysis did not produce a usable frame selection. Please try again.".to_string(),
        )),
        Ok(Err(e)) => {
            log::warn!("Best-frame request failed: {}", e);
            Err(AnalyticsError::ReasoningService(e.to_string()))
        }
        Err(e) => {
            log::error!("Best-frame task panicked or was cancelled: {}", e);
            Err(AnalyticsError::ReasoningService(
                "The analysis was interrupted. Please try again.".to_string(),
            ))
        }
    }
}
