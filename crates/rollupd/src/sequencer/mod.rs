//! Client side of the sequencer HTTP protocol.
//!
//! The runtime reports the verdict of the previous request with
//! `POST /finish {"status": "accept"|"reject"}`; the reply is either `202` (no
//! pending request) or `200` with the next request. Outputs are posted to
//! `/report`, `/notice`, and `/voucher` as `0x`-prefixed hex payloads.

mod errors;
mod http;

use std::sync::Arc;

use crate::dispatch::{Output, RollupRequest, Verdict};

pub use self::errors::SequencerError;
pub use self::http::HttpSequencer;

/// Tracing target for sequencer traffic.
pub(crate) const SEQUENCER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::sequencer");

/// Result of one `/finish` round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    /// The sequencer has nothing to process yet.
    Empty,
    /// Next request to process.
    Request(RollupRequest),
}

/// Operations the runtime needs from the sequencer.
pub trait SequencerClient {
    /// Delivers `status` for the previous request and waits for the next one.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Envelope`] when the reply carried a request
    /// that could not be parsed, and a transport error for anything else.
    fn poll_next(&self, status: Verdict) -> Result<Poll, SequencerError>;

    /// Submits one output. Returns the index assigned by the sequencer when it
    /// reports one.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request fails or the reply status
    /// is not successful.
    fn submit(&self, output: &Output) -> Result<Option<u64>, SequencerError>;
}

impl<T> SequencerClient for Arc<T>
where
    T: SequencerClient + ?Sized,
{
    fn poll_next(&self, status: Verdict) -> Result<Poll, SequencerError> {
        (**self).poll_next(status)
    }

    fn submit(&self, output: &Output) -> Result<Option<u64>, SequencerError> {
        (**self).submit(output)
    }
}
