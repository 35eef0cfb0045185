//! Dashboard Commands
//!
//! Deterministic analytics over the loaded CSV: the dashboard aggregates
//! and the brand candidate list for the best-frame finder. No reasoning
//! service is involved here.
//!
//! # Derive, Don't Cache
//!
//! Both commands re-derive their results from the raw CSV text on every
//! call. The inputs are small (a match export is thousands of rows, not
//! millions) and re-deriving keeps the state model trivial: the raw text
//! is the single source of truth.

use tauri::State;

use exposure_analytics::{aggregate, parse_dataset, suggest_brands, AnalyticsError, DashboardData};

use crate::state::AppState;

/// Parses the loaded CSV and returns the dashboard aggregates.
///
/// # Returns
///
/// - `Ok(DashboardData)` - top-10 brand rankings and full category
///   rankings, by frequency and by coverage
/// - `Err(AnalyticsError)` - no file loaded, required columns missing,
///   or the file had no data rows. Serialized as `{ code, message }`.
///
/// # Frontend Usage
///
/// ```typescript
/// const data = await invoke<DashboardData>("get_dashboard_data");
/// ```
#[tauri::command]
pub fn get_dashboard_data(state: State<'_, AppState>) -> Result<DashboardData, AnalyticsError> {
    let guard = state.csv.read();
    let loaded = guard.as_ref().ok_or(AnalyticsError::NoDataLoaded)?;

    let dataset = parse_dataset(&loaded.text)?;
    Ok(aggregate(&dataset))
}

/// Returns the brand candidate list for the best-frame finder dropdown.
///
/// Distinct brand names from the loaded CSV, most frequent first, with
/// tournament bodies and other non-sponsor entries filtered out. Returns
/// an empty list when no file is loaded; an empty dropdown is the
/// correct rendering of that state, not an error.
#[tauri::command]
pub fn get_brand_candidates(state: State<'_, AppState>) -> Vec<String> {
    let guard = state.csv.read();
    match guard.as_ref() {
        Some(loaded) => suggest_brands(&loaded.text),
        None => Vec::new(),
    }
}
