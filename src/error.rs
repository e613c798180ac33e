//! Custom error types for scholarmetrics.
//!
//! Fetchers use these internally and fold them into a
//! [`FetchOutcome`](crate::metrics::FetchOutcome) before the orchestrator sees them.

use thiserror::Error;

/// Main error type for scholarmetrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// External API returned a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from API
        message: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `MetricsError`
pub type Result<T> = std::result::Result<T, MetricsError>;
