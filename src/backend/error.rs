//! Backend error types
//!
//! Errors raised while talking to the hosted data service.

use thiserror::Error;

/// Errors that can occur when reading from or writing to the backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A row could not be decoded into the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The write or read was refused without an HTTP exchange
    /// (used by the in-memory backend for injected failures)
    #[error("{0}")]
    Rejected(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

impl BackendError {
    /// Message suitable for showing to a visitor
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
