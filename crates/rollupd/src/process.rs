//! Process entry point: bootstrap, then hand control to the request loop.

use std::convert::Infallible;
use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{BootstrapError, SystemConfigLoader, bootstrap_with};
use crate::health::StructuredHealthReporter;

const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Loads configuration from the process environment and runs the request loop
/// forever.
///
/// # Errors
///
/// Returns a [`BootstrapError`] when configuration, telemetry, or the
/// sequencer client cannot be set up. Once the loop starts it never returns.
pub fn run_daemon() -> Result<Infallible, BootstrapError> {
    let daemon = bootstrap_with(&SystemConfigLoader, Arc::new(StructuredHealthReporter::new()))?;
    let sequencer = daemon.connect()?;
    info!(
        target: PROCESS_TARGET,
        server = %daemon.settings().server_url(),
        "entering request loop"
    );
    daemon.runner(sequencer).run()
}
