//! Server-side error type.
//!
//! Every failure inside a server function is an [`ApiError`]; it is flattened to a
//! `ServerFnError` message at the boundary so the client can show it inline.

use store::WorkspaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rejected by the identity provider; the message is shown to the user as is.
    #[error("{0}")]
    Auth(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Form input failed validation.
    #[error("{0}")]
    Validation(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),
}

impl ApiError {
    pub fn auth<T: std::fmt::Display>(msg: T) -> Self {
        ApiError::Auth(msg.to_string())
    }

    pub fn config<T: std::fmt::Display>(msg: T) -> Self {
        ApiError::Config(msg.to_string())
    }

    pub fn session<T: std::fmt::Display>(msg: T) -> Self {
        ApiError::Session(msg.to_string())
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(e: tower_sessions::session::Error) -> Self {
        ApiError::Session(e.to_string())
    }
}
