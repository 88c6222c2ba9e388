//! Error types for operations and persisted state

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure captured from a wrapped asynchronous function.
///
/// There is a single failure kind: the message is the `Display` form of
/// whatever the wrapped function returned as its error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct OperationError {
    message: String,
}

impl OperationError {
    /// Create an error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Normalize any displayable fault into an operation error.
    #[must_use]
    pub fn from_display(fault: &impl fmt::Display) -> Self {
        Self::new(fault.to_string())
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for OperationError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for OperationError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Result type for persisted state operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while reading or writing the local store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error on the backing file
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Backing file or stored value is not valid JSON for the requested type
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backing file does not contain a JSON object
    #[error("Store {0} is not a JSON object")]
    NotAnObject(PathBuf),
}
