//! Custom error types for the exposure analytics core.
//!
//! This module provides the error hierarchy using `thiserror`. Errors are
//! serializable for Tauri IPC compatibility, allowing them to be sent to
//! the frontend for display.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for CSV analytics and reasoning-service operations.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// One or more required CSV columns could not be resolved.
    ///
    /// Carries the logical column names that were missing so the message
    /// can list them for the user (e.g. `c_li`).
    #[error("CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The CSV text had fewer than two lines (no header + data).
    /// Treated upstream as "no usable data" rather than a fatal failure.
    #[error("CSV has no data rows (header and at least one row required)")]
    EmptyOrHeaderOnly,

    /// No CSV has been loaded into the session.
    #[error("No CSV data loaded")]
    NoDataLoaded,

    /// The reasoning-service credential was absent or blank.
    /// Short-circuits any reasoning-service call before dispatch.
    #[error("Reasoning service credential is missing")]
    MissingCredential,

    /// A call to the external reasoning service failed
    /// (network, credential, or response-parse failure).
    #[error("Reasoning service error: {0}")]
    ReasoningService(String),

    /// A reasoning-service call is already outstanding for this view.
    #[error("A request is already in progress, please wait for it to finish")]
    RequestPending,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (reasoning-service client, only with "ai" feature).
    #[cfg(feature = "ai")]
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),
}

impl AnalyticsError {
    /// Get error code for frontend handling.
    ///
    /// These codes can be used by the frontend to handle specific error
    /// types differently (e.g. rendering missing-column errors inline
    /// on the dashboard instead of as a toast).
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingColumns(_) => "MISSING_COLUMNS",
            Self::EmptyOrHeaderOnly => "EMPTY_OR_HEADER_ONLY",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::MissingCredential => "MISSING_CREDENTIAL",
            Self::ReasoningService(_) => "REASONING_SERVICE_ERROR",
            Self::RequestPending => "REQUEST_PENDING",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "ai")]
            Self::HttpRequest(_) => "HTTP_REQUEST_ERROR",
        }
    }

    /// Check if this error means "no usable data" rather than a real fault.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::EmptyOrHeaderOnly | Self::NoDataLoaded)
    }
}

/// Serialize implementation for Tauri IPC compatibility.
///
/// Errors are serialized as a struct with `code` and `message` fields,
/// making them easy to handle in the frontend.
impl Serialize for AnalyticsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalyticsError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            AnalyticsError::MissingColumns(vec!["c_li".to_string()]).error_code(),
            "MISSING_COLUMNS"
        );
        assert_eq!(
            AnalyticsError::EmptyOrHeaderOnly.error_code(),
            "EMPTY_OR_HEADER_ONLY"
        );
    }

    #[test]
    fn test_missing_columns_message_lists_names() {
        let error =
            AnalyticsError::MissingColumns(vec!["c_li".to_string(), "ad_category".to_string()]);
        let message = error.to_string();
        assert!(message.contains("c_li"));
        assert!(message.contains("ad_category"));
    }

    #[test]
    fn test_is_no_data() {
        assert!(AnalyticsError::EmptyOrHeaderOnly.is_no_data());
        assert!(AnalyticsError::NoDataLoaded.is_no_data());
        assert!(!AnalyticsError::MissingCredential.is_no_data());
    }

    #[test]
    fn test_error_serialization() {
        let error = AnalyticsError::MissingColumns(vec!["brand_name".to_string()]);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("MISSING_COLUMNS"));
        assert!(json.contains("brand_name"));
    }
}
