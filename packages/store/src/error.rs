//! Errors raised by workspace operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// A path segment the database would reject.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// User input failed a required-field check.
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by the underlying [`crate::WorkspaceStore`].
    #[error("backend error: {0}")]
    Backend(String),
}

impl WorkspaceError {
    pub fn backend<T: std::fmt::Display>(msg: T) -> Self {
        WorkspaceError::Backend(msg.to_string())
    }
}
