//! The request loop.
//!
//! The loop alternates between two states. While [`LoopState::Idle`] it holds
//! the verdict owed to the sequencer and delivers it with the next poll. While
//! [`LoopState::Processing`] it owns exactly one request, dispatches it, and
//! submits the outputs in order before going idle again. Nothing that happens
//! to a single request stops the loop.

use std::mem;
use std::sync::Arc;
use std::thread;

use tracing::{debug, error, warn};

use crate::dispatch::{DispatchOutcome, Dispatcher, Output, RollupRequest, Verdict};
use crate::emitter::{OutputEmitter, RetryPolicy};
use crate::health::HealthReporter;
use crate::sequencer::{Poll, SequencerClient, SequencerError};

const RUNNER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::runner");

/// Loop state between steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for work; `status` is delivered with the next poll.
    Idle {
        /// Verdict owed for the previous request.
        status: Verdict,
    },
    /// Holding a request that has not been dispatched yet.
    Processing {
        /// Request in flight.
        request: RollupRequest,
    },
}

impl LoopState {
    /// State the loop starts in.
    #[must_use]
    pub const fn initial() -> Self {
        Self::Idle {
            status: Verdict::Accept,
        }
    }
}

/// Drives requests from a sequencer through a dispatcher.
pub struct Runner<S> {
    sequencer: S,
    dispatcher: Dispatcher,
    emitter: OutputEmitter,
    poll_backoff: RetryPolicy,
    reporter: Arc<dyn HealthReporter>,
    state: LoopState,
    poll_failures: u32,
}

impl<S> Runner<S>
where
    S: SequencerClient,
{
    /// Creates a runner in the initial state.
    #[must_use]
    pub fn new(
        sequencer: S,
        dispatcher: Dispatcher,
        retry: RetryPolicy,
        reporter: Arc<dyn HealthReporter>,
    ) -> Self {
        Self {
            sequencer,
            dispatcher,
            emitter: OutputEmitter::new(retry, Arc::clone(&reporter)),
            poll_backoff: retry,
            reporter,
            state: LoopState::initial(),
            poll_failures: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Dispatcher and the ledger it owns.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Sequencer client.
    #[must_use]
    pub fn sequencer(&self) -> &S {
        &self.sequencer
    }

    /// Runs forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Performs one state transition.
    pub fn step(&mut self) {
        let state = mem::replace(&mut self.state, LoopState::initial());
        self.state = match state {
            LoopState::Idle { status } => self.poll(status),
            LoopState::Processing { request } => self.process(&request),
        };
    }

    fn poll(&mut self, status: Verdict) -> LoopState {
        match self.sequencer.poll_next(status) {
            Ok(Poll::Empty) => {
                self.poll_failures = 0;
                debug!(target: RUNNER_TARGET, "no pending request");
                LoopState::initial()
            }
            Ok(Poll::Request(request)) => {
                self.poll_failures = 0;
                self.reporter.request_received(request.kind());
                LoopState::Processing { request }
            }
            Err(SequencerError::Envelope { source }) => {
                self.poll_failures = 0;
                warn!(target: RUNNER_TARGET, error = %source, "rejecting malformed request");
                let outcome = DispatchOutcome::rejected(&source);
                self.emit(&outcome.outputs);
                LoopState::Idle {
                    status: Verdict::Reject,
                }
            }
            Err(error) => {
                self.poll_failures = self.poll_failures.saturating_add(1);
                self.reporter.poll_failed(&error, self.poll_failures);
                thread::sleep(self.poll_backoff.delay(self.poll_failures - 1));
                LoopState::Idle { status }
            }
        }
    }

    fn process(&mut self, request: &RollupRequest) -> LoopState {
        let outcome = self.dispatcher.dispatch(request);
        self.emit(&outcome.outputs);
        self.reporter.request_finished(request.kind(), outcome.verdict);
        LoopState::Idle {
            status: outcome.verdict.unwrap_or(Verdict::Accept),
        }
    }

    fn emit(&self, outputs: &[Output]) {
        for output in outputs {
            if let Err(error) = self.emitter.send(&self.sequencer, output) {
                error!(
                    target: RUNNER_TARGET,
                    kind = %output.kind(),
                    %error,
                    "output dropped"
                );
            }
        }
    }
}
