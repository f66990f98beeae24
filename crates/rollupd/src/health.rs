//! Structured health reporting for runtime lifecycle events.

use std::sync::Arc;

use crate::bootstrap::BootstrapError;
use crate::dispatch::{OutputKind, RequestKind, Verdict};
use crate::sequencer::SequencerError;
use crate::settings::Settings;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, settings: &Settings);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked when the sequencer hands over a request.
    fn request_received(&self, kind: RequestKind);

    /// Invoked once a request's outputs have been submitted.
    fn request_finished(&self, kind: RequestKind, verdict: Option<Verdict>);

    /// Invoked when a `/finish` round trip fails. `consecutive` counts
    /// failures since the last successful poll.
    fn poll_failed(&self, error: &SequencerError, consecutive: u32);

    /// Invoked when an output is abandoned after its last retry.
    fn output_dropped(&self, kind: OutputKind, error: &SequencerError);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, settings: &Settings) {
        (**self).bootstrap_succeeded(settings);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn request_received(&self, kind: RequestKind) {
        (**self).request_received(kind);
    }

    fn request_finished(&self, kind: RequestKind, verdict: Option<Verdict>) {
        (**self).request_finished(kind, verdict);
    }

    fn poll_failed(&self, error: &SequencerError, consecutive: u32) {
        (**self).poll_failed(error, consecutive);
    }

    fn output_dropped(&self, kind: OutputKind, error: &SequencerError) {
        (**self).output_dropped(kind, error);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting rollup runtime bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, settings: &Settings) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            server = %settings.server_url(),
            ether_portal = %settings.contracts().ether_portal,
            dapp = %settings.contracts().dapp,
            submit_attempts = settings.retry().attempts(),
            "rollup runtime bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "rollup runtime bootstrap failed"
        );
    }

    fn request_received(&self, kind: RequestKind) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "request_received",
            kind = %kind,
            "request received"
        );
    }

    fn request_finished(&self, kind: RequestKind, verdict: Option<Verdict>) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "request_finished",
            kind = %kind,
            verdict = ?verdict,
            "request finished"
        );
    }

    fn poll_failed(&self, error: &SequencerError, consecutive: u32) {
        tracing::warn!(
            target: HEALTH_TARGET,
            event = "poll_failed",
            consecutive,
            error = %error,
            "sequencer poll failed"
        );
    }

    fn output_dropped(&self, kind: OutputKind, error: &SequencerError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "output_dropped",
            kind = %kind,
            error = %error,
            "output dropped after final retry"
        );
    }
}
