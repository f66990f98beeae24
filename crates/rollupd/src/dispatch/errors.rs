//! Error types for request dispatch failures.
//!
//! Every variant degrades to a rejected request (or, for inspect requests, a
//! diagnostic report). The display text is exactly what ends up in the report
//! payload.

use thiserror::Error;

use crate::codec::DecodeError;
use crate::ledger::DomainError;

/// Per-request dispatch failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The `/finish` body was not a recognisable request envelope.
    #[error("malformed request: {message}")]
    MalformedRequest {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The request payload could not be decoded.
    #[error("malformed payload: {0}")]
    Decode(#[from] DecodeError),

    /// The ledger refused the command.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An inspect route matched a known prefix but its parameter was invalid.
    #[error("invalid route: {message}")]
    InvalidRoute { message: String },
}

impl DispatchError {
    /// Creates a malformed request error from a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedRequest {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed request error with a custom message.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an invalid route error.
    pub fn invalid_route(message: impl Into<String>) -> Self {
        Self::InvalidRoute {
            message: message.into(),
        }
    }
}
