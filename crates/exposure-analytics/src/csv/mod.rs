//! CSV parsing for broadcast exposure exports.
//!
//! The exports this tool consumes are loosely structured: headers vary in
//! casing, the category column goes by two names, and free-text cells may
//! contain quoted commas. The parser here normalizes all of that into an
//! [`ExposureDataset`](crate::types::ExposureDataset) without depending on
//! a full CSV dialect implementation.

mod parser;

pub use parser::{parse_dataset, split_line};
