//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Message used when the store refuses a delivery update without saying why
pub const DEFAULT_MARK_ERROR: &str = "Error marking order as delivered";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response on a read endpoint
    #[error("Error: {text}")]
    Status { status: StatusCode, text: String },

    /// The store answered a write with an explicit error
    #[error("{0}")]
    Rejected(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Build a status error carrying the HTTP reason phrase
    pub fn from_status(status: StatusCode) -> Self {
        let text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        ClientError::Status { status, text }
    }

    /// HTTP status of the failed call, when the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
