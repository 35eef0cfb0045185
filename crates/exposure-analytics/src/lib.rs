//! Brand Exposure Analytics Library
//!
//! The analytics core behind the Brand Analytics Suite: parsing
//! per-frame cricket-broadcast brand-exposure CSVs, aggregating
//! brand/category statistics for dashboard charts, and delegating
//! natural-language analysis to an external reasoning service.
//!
//! # Overview
//!
//! - **CSV parsing**: tolerant parser for loosely-structured exports
//!   (quoted commas, case-insensitive headers, column aliases)
//! - **Aggregation**: deterministic frequency and coverage-sum rankings
//!   per brand and ad category
//! - **Brand candidates**: top-N suggestion list with non-sponsor
//!   entities filtered out
//! - **Reasoning service**: trait-based LLM abstraction with a Gemini
//!   client (optional `ai` feature) for free-text Q&A and structured
//!   best-frame selection
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use exposure_analytics::{aggregate, parse_dataset};
//! use exposure_analytics::ai::{GeminiClient, ReasoningService};
//!
//! let text = std::fs::read_to_string("match_exposure.csv")?;
//!
//! // Deterministic analytics
//! let dataset = parse_dataset(&text)?;
//! let dashboard = aggregate(&dataset);
//! println!("top brand: {:?}", dashboard.top_brands_by_frequency.first());
//!
//! // Delegated analysis
//! let client = GeminiClient::new(api_key)?;
//! let answer = client.answer_question(&text, "Which sponsor dominates jersey placements?")?;
//! let best = client.select_best_frame(&text, "Pepsi")?;
//! ```
//!
//! # Reasoning Backends
//!
//! All LLM interaction goes through the [`ai::ReasoningService`] trait so
//! the application shell and tests can substitute deterministic stubs.
//! See the [`ai`] module for how to add another backend.

pub mod ai;
pub mod analytics;
pub mod csv;
pub mod error;
pub mod types;

// Re-exports for convenient access
pub use analytics::{aggregate, is_excluded_brand, suggest_brands, MAX_BRAND_SUGGESTIONS};
pub use csv::parse_dataset;
pub use error::{AnalyticsError, Result as AnalyticsResult};
pub use types::{
    Aggregate, BestFrameSelection, BrandAggregate, CategoryAggregate, ChatMessage, ChatRole,
    ColumnLayout, DashboardData, ExposureDataset, ExposureRecord,
};
