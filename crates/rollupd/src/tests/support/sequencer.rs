//! In-memory [`SequencerClient`] driven by a script of poll replies.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::dispatch::{DispatchError, Output, RollupRequest, Verdict};
use crate::sequencer::{Poll, SequencerClient, SequencerError};

/// One scripted reply to `poll_next`.
#[derive(Debug)]
pub enum Reply {
    /// Hand over a request.
    Request(RollupRequest),
    /// Fail below the protocol.
    Unavailable,
    /// Reply `200` with an unparseable body.
    Garbled,
}

#[derive(Debug, Default)]
struct State {
    replies: VecDeque<Reply>,
    statuses: Vec<Verdict>,
    submitted: Vec<Output>,
    failing_submissions: u32,
}

/// Sequencer double. Once the script runs out every poll reports no work.
#[derive(Debug, Default)]
pub struct ScriptedSequencer {
    state: Mutex<State>,
}

impl ScriptedSequencer {
    /// Appends a reply to the script.
    pub fn push(&self, reply: Reply) {
        self.lock().replies.push_back(reply);
    }

    /// Makes the next `count` submissions fail.
    pub fn fail_submissions(&self, count: u32) {
        self.lock().failing_submissions = count;
    }

    /// Statuses delivered through `poll_next`, in order.
    #[must_use]
    pub fn statuses(&self) -> Vec<Verdict> {
        self.lock().statuses.clone()
    }

    /// Outputs accepted by `submit`, in order.
    #[must_use]
    pub fn submitted(&self) -> Vec<Output> {
        self.lock().submitted.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("sequencer state mutex poisoned")
    }
}

impl SequencerClient for ScriptedSequencer {
    fn poll_next(&self, status: Verdict) -> Result<Poll, SequencerError> {
        let mut state = self.lock();
        state.statuses.push(status);
        match state.replies.pop_front() {
            None => Ok(Poll::Empty),
            Some(Reply::Request(request)) => Ok(Poll::Request(request)),
            Some(Reply::Unavailable) => Err(SequencerError::unexpected_status(
                "finish",
                503,
                "sequencer unavailable",
            )),
            Some(Reply::Garbled) => Err(SequencerError::Envelope {
                source: DispatchError::malformed("garbled envelope"),
            }),
        }
    }

    fn submit(&self, output: &Output) -> Result<Option<u64>, SequencerError> {
        let mut state = self.lock();
        if state.failing_submissions > 0 {
            state.failing_submissions -= 1;
            return Err(SequencerError::unexpected_status(
                output.kind().as_str(),
                500,
                "try again",
            ));
        }
        state.submitted.push(output.clone());
        Ok(u64::try_from(state.submitted.len() - 1).ok())
    }
}
