//! Core data types shared across the analytics library and the Tauri shell.
//!
//! Everything that crosses the IPC boundary derives `Serialize`/`Deserialize`
//! and mirrors a TypeScript type on the frontend.

use serde::{Deserialize, Serialize};

// ============================================================================
// DATASET TYPES
// ============================================================================

/// One parsed CSV row describing a single brand placement in a video frame.
///
/// Required fields (`brand`, `coverage`, `category`) are guaranteed present
/// and valid by the parser; rows failing validation never become records.
///
/// # Fields
///
/// * `brand` - Brand name, trimmed and quote-stripped (case preserved)
/// * `coverage` - The `c_li` metric: logo area relative to frame area
/// * `category` - Ad location category (jersey, signage, on-screen graphic)
/// * `detail` - Optional placement detail from the `ad_details` column
/// * `description` - Optional scene/action description
/// * `frame_number` - Optional `frame_no` identifier of the video frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureRecord {
    pub brand: String,
    pub coverage: f64,
    pub category: String,
    pub detail: Option<String>,
    pub description: Option<String>,
    pub frame_number: Option<i64>,
}

/// Resolved header indices for a parsed CSV.
///
/// Column resolution happens once per dataset and is reused for every row.
/// The three required columns are resolved through alias lists; optional
/// columns are `None` when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnLayout {
    pub brand: usize,
    pub coverage: usize,
    pub category: usize,
    pub detail: Option<usize>,
    pub description: Option<usize>,
    pub frame: Option<usize>,
}

impl ColumnLayout {
    /// Highest index among the required columns. Rows with fewer fields
    /// than this cannot be extracted and are skipped.
    pub fn required_max(&self) -> usize {
        self.brand.max(self.coverage).max(self.category)
    }
}

/// An ordered, immutable collection of exposure records plus the header
/// mapping they were extracted with.
///
/// Created once per upload and held in memory for the session; aggregates
/// are pure derivations recomputed on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureDataset {
    pub records: Vec<ExposureRecord>,
    pub layout: ColumnLayout,
    /// Number of data rows dropped during parsing (malformed, short, or
    /// non-numeric coverage). Logged, never surfaced as an error.
    pub skipped_rows: usize,
}

impl ExposureDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// AGGREGATE TYPES
// ============================================================================

/// Frequency and coverage-sum totals for a single brand or category key.
///
/// # Mirrors
///
/// TypeScript: `types/index.ts::Aggregate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// The brand or category name (case-sensitive, trimmed, quote-stripped).
    pub name: String,
    /// Number of rows carrying this key.
    pub frequency: u64,
    /// Sum of the `c_li` coverage values across those rows.
    pub coverage_sum: f64,
}

/// Per-brand aggregate, keyed by the exact trimmed brand string.
pub type BrandAggregate = Aggregate;

/// Per-category aggregate, keyed by the exact trimmed category string.
pub type CategoryAggregate = Aggregate;

/// The four ranked lists the dashboard charts are built from.
///
/// Brand lists are truncated to the top 10; category lists are kept whole
/// (the frontend renders them as pie charts).
///
/// # Mirrors
///
/// TypeScript: `types/index.ts::DashboardData`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub top_brands_by_frequency: Vec<BrandAggregate>,
    pub top_brands_by_coverage: Vec<BrandAggregate>,
    pub categories_by_frequency: Vec<CategoryAggregate>,
    pub categories_by_coverage: Vec<CategoryAggregate>,
    /// Number of records that contributed to the aggregates.
    pub record_count: usize,
}

// ============================================================================
// REASONING-SERVICE TYPES
// ============================================================================

/// Structured best-frame selection returned by the reasoning service.
///
/// Both fields are mandatory; a response missing either is treated as a
/// failed call, not a partially valid one.
///
/// # Mirrors
///
/// TypeScript: `types/index.ts::BestFrameSelection`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestFrameSelection {
    /// The single best frame number for the brand's exposure.
    pub frame_number: i64,
    /// Why this frame was chosen, referencing the rubric criteria.
    pub reasoning: String,
}

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn in the CSV chatbot transcript.
///
/// # Mirrors
///
/// TypeScript: `types/index.ts::ChatMessage`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_max_uses_largest_index() {
        let layout = ColumnLayout {
            brand: 3,
            coverage: 1,
            category: 0,
            detail: Some(7),
            description: None,
            frame: None,
        };
        // Optional columns never raise the required maximum.
        assert_eq!(layout.required_max(), 3);
    }

    #[test]
    fn test_best_frame_selection_camel_case() {
        let json = r#"{"frameNumber": 42, "reasoning": "high coverage on a boundary"}"#;
        let selection: BestFrameSelection = serde_json::from_str(json).unwrap();
        assert_eq!(selection.frame_number, 42);
        assert!(selection.reasoning.contains("boundary"));
    }

    #[test]
    fn test_best_frame_selection_requires_reasoning() {
        let json = r#"{"frameNumber": 42}"#;
        let result: Result<BestFrameSelection, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
