//! Request envelopes delivered by the sequencer.
//!
//! A `200` reply to `POST /finish` carries one request as
//! `{"request_type": "...", "data": {...}}`. Payloads stay hex-encoded here;
//! the dispatcher decodes them so that a malformed payload becomes a rejected
//! request instead of a transport failure.

use std::fmt;

use serde::Deserialize;

use crate::address::Address;

use super::errors::DispatchError;

/// Request delivered by the sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "request_type", content = "data")]
pub enum RollupRequest {
    /// State-changing request that yields a verdict.
    #[serde(rename = "advance_state")]
    Advance(AdvanceRequest),
    /// Read-only query.
    #[serde(rename = "inspect_state")]
    Inspect(InspectRequest),
}

/// Advance request body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdvanceRequest {
    /// Facts about the input recorded by the sequencer.
    pub metadata: Metadata,
    /// Hex-encoded payload.
    pub payload: String,
}

/// Input metadata attached to advance requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    /// Account or contract that sent the input.
    pub msg_sender: Address,
    /// Epoch the input belongs to.
    #[serde(default)]
    pub epoch_index: u64,
    /// Position of the input within the epoch.
    #[serde(default)]
    pub input_index: u64,
    /// Block that included the input.
    #[serde(default)]
    pub block_number: u64,
    /// Block timestamp in seconds.
    pub timestamp: u64,
}

/// Inspect request body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InspectRequest {
    /// Hex-encoded route string.
    pub payload: String,
}

/// Request kinds, used for logging and health events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Advance request.
    Advance,
    /// Inspect request.
    Inspect,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Advance => "advance",
            Self::Inspect => "inspect",
        };
        formatter.write_str(label)
    }
}

impl RollupRequest {
    /// Parses a `/finish` response body.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MalformedRequest`] when the body is empty, is
    /// not JSON, names an unknown request type, or lacks required fields.
    pub fn parse(body: &[u8]) -> Result<Self, DispatchError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(DispatchError::malformed("empty request body"));
        }
        serde_json::from_slice(body).map_err(DispatchError::from_json_error)
    }

    /// Kind of the request.
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Advance(_) => RequestKind::Advance,
            Self::Inspect(_) => RequestKind::Inspect,
        }
    }
}

#[cfg(test)]
impl RollupRequest {
    /// Advance request carrying raw payload bytes.
    pub(crate) fn advance_bytes(sender: Address, timestamp: u64, payload: &[u8]) -> Self {
        Self::Advance(AdvanceRequest {
            metadata: Metadata {
                msg_sender: sender,
                epoch_index: 0,
                input_index: 0,
                block_number: 0,
                timestamp,
            },
            payload: crate::codec::encode_hex(payload),
        })
    }

    /// Advance request carrying a command line.
    pub(crate) fn advance_text(sender: Address, timestamp: u64, line: &str) -> Self {
        Self::advance_bytes(sender, timestamp, line.as_bytes())
    }

    /// Inspect request carrying a route string.
    pub(crate) fn inspect_text(route: &str) -> Self {
        Self::Inspect(InspectRequest {
            payload: crate::codec::encode_hex(route.as_bytes()),
        })
    }
}
