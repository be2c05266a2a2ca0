//! Error types for Autotask API operations.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during Autotask API operations.
#[derive(Debug, Error)]
pub enum AutotaskError {
    /// Configuration is missing or incomplete.
    #[error("Autotask configuration required: {0}")]
    ConfigMissing(String),

    /// The API rejected the request semantically.
    ///
    /// Raised whenever a decoded response body carries an `errors` key,
    /// regardless of HTTP status. The vendor error payload is carried
    /// verbatim.
    #[error("Autotask API error: {errors:?}")]
    Api {
        errors: Vec<Value>,
        status_code: Option<u16>,
    },

    /// HTTP transport error (could not reach the server, timeout, or a
    /// non-2xx status without an API error body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// Response parsed but did not have the expected shape.
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for Autotask operations.
pub type Result<T> = core::result::Result<T, AutotaskError>;
