//! Test double for [`HealthReporter`] that records structured events for assertions.

use std::sync::Mutex;

use crate::bootstrap::BootstrapError;
use crate::dispatch::{OutputKind, RequestKind, Verdict};
use crate::health::HealthReporter;
use crate::sequencer::SequencerError;
use crate::settings::Settings;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthEvent {
    /// Bootstrap started.
    BootstrapStarting,
    /// Bootstrap completed successfully.
    BootstrapSucceeded,
    /// Bootstrap failed with an error description.
    BootstrapFailed(String),
    /// A request arrived.
    RequestReceived(RequestKind),
    /// A request finished.
    RequestFinished(RequestKind, Option<Verdict>),
    /// A poll failed; carries the consecutive failure count.
    PollFailed(u32),
    /// An output was abandoned.
    OutputDropped(OutputKind),
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    pub fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _settings: &Settings) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn request_received(&self, kind: RequestKind) {
        self.record(HealthEvent::RequestReceived(kind));
    }

    fn request_finished(&self, kind: RequestKind, verdict: Option<Verdict>) {
        self.record(HealthEvent::RequestFinished(kind, verdict));
    }

    fn poll_failed(&self, _error: &SequencerError, consecutive: u32) {
        self.record(HealthEvent::PollFailed(consecutive));
    }

    fn output_dropped(&self, kind: OutputKind, _error: &SequencerError) {
        self.record(HealthEvent::OutputDropped(kind));
    }
}
