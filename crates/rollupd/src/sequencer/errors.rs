//! Error types for sequencer round trips.

use thiserror::Error;

use crate::dispatch::DispatchError;

/// Failures talking to the sequencer.
#[derive(Debug, Error)]
pub enum SequencerError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client {
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The sequencer replied with a status the protocol does not allow.
    #[error("{endpoint} returned unexpected status {status}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// A `200` reply to `/finish` did not carry a valid request.
    #[error("invalid request envelope: {source}")]
    Envelope {
        #[source]
        source: DispatchError,
    },
}

impl SequencerError {
    /// Creates a transport error for `endpoint`.
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Creates an unexpected status error for `endpoint`.
    pub fn unexpected_status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }
}
