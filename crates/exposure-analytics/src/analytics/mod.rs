//! Aggregation and ranking over parsed exposure datasets.
//!
//! Everything here is a pure derivation: the same dataset always produces
//! the same output, and nothing mutates shared state.

mod aggregator;
mod candidates;

pub use aggregator::aggregate;
pub use candidates::{is_excluded_brand, suggest_brands, MAX_BRAND_SUGGESTIONS};
