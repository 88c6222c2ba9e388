//! Error types for task API clients.

use thiserror::Error;

/// Errors that can occur while talking to a task API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Task was not found.
    #[error("Task not found: {0}")]
    NotFound(u64),

    /// Server answered with a non-success status.
    #[error("Server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to encode or decode task JSON.
    #[error("Failed to parse tasks: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other unclassified error.
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type for task API operations.
pub type Result<T> = std::result::Result<T, ClientError>;
