//! Typed errors for the filter core
//!
//! The core deliberately has a tiny error surface: the only fatal condition
//! is a property path that fails sanitization. Everything else either passes
//! through a whitelist (silently skipped) or degrades to a weaker predicate.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by the filter core
///
/// Both variants are client-input errors and map to `400 Bad Request`.
/// A non-whitelisted filter or sort key is *not* an error: it is skipped
/// without feedback so the whitelist never leaks which properties exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A property path failed the sanitizer grammar
    ///
    /// Raised the first time a path with unexpected characters would reach
    /// query construction. Aborts the whole request; no partial query is
    /// ever returned.
    #[error("invalid property name: '{name}'")]
    InvalidPropertyName { name: String },

    /// The request query string could not be decoded into key/value pairs
    ///
    /// Only raised by the HTTP extractor, never by the core pipeline.
    #[error("invalid query string: {message}")]
    InvalidQueryString { message: String },
}

impl FilterError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FilterError::InvalidPropertyName { .. } => StatusCode::BAD_REQUEST,
            FilterError::InvalidQueryString { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FilterError::InvalidPropertyName { .. } => "INVALID_PROPERTY_NAME",
            FilterError::InvalidQueryString { .. } => "INVALID_QUERY_STRING",
        }
    }
}

impl IntoResponse for FilterError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({
            "code": self.error_code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

/// A specialized Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
