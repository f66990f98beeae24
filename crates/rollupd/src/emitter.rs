//! Output submission with bounded retry.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::dispatch::Output;
use crate::health::HealthReporter;
use crate::sequencer::{SequencerClient, SequencerError};

const EMITTER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::emitter");

/// Doubling stops here; the cap takes over long before.
const MAX_DOUBLINGS: u32 = 16;

/// Exponential backoff schedule with a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    /// Creates a policy. `attempts` is clamped to at least one.
    #[must_use]
    pub fn new(attempts: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            initial_backoff,
            max_backoff: max_backoff.max(initial_backoff),
        }
    }

    /// Total attempts per output, including the first.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Delay before retry number `retry` (zero-based).
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        let factor = 1_u32 << retry.min(MAX_DOUBLINGS);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Submits outputs, retrying transport failures according to a
/// [`RetryPolicy`].
#[derive(Clone)]
pub struct OutputEmitter {
    policy: RetryPolicy,
    reporter: Arc<dyn HealthReporter>,
}

impl OutputEmitter {
    /// Creates an emitter.
    #[must_use]
    pub fn new(policy: RetryPolicy, reporter: Arc<dyn HealthReporter>) -> Self {
        Self { policy, reporter }
    }

    /// Submits one output.
    ///
    /// # Errors
    ///
    /// Returns the last [`SequencerError`] once every attempt has failed. The
    /// drop has already been reported to the health reporter by then.
    pub fn send<S>(&self, sequencer: &S, output: &Output) -> Result<(), SequencerError>
    where
        S: SequencerClient + ?Sized,
    {
        let kind = output.kind();
        let mut attempt = 1;
        loop {
            match sequencer.submit(output) {
                Ok(index) => {
                    debug!(target: EMITTER_TARGET, %kind, ?index, attempt, "output submitted");
                    return Ok(());
                }
                Err(error) if attempt < self.policy.attempts() => {
                    let delay = self.policy.delay(attempt - 1);
                    warn!(
                        target: EMITTER_TARGET,
                        %kind,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        %error,
                        "output submission failed; retrying"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(error) => {
                    self.reporter.output_dropped(kind, &error);
                    return Err(error);
                }
            }
        }
    }
}
