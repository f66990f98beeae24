//! BDD test worlds: bootstrap state and request-loop state for step functions.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use crate::address::{ADDRESS_LEN, Address};
use crate::bootstrap::{BootstrapError, ConfigLoader, Daemon, bootstrap_with};
use crate::dispatch::{Contracts, Dispatcher, Output, RollupRequest};
use crate::emitter::RetryPolicy;
use crate::runner::Runner;

use super::config_loader::{FailingConfigLoader, TestConfigLoader, UnreachableConfigLoader};
use super::reporter::RecordingHealthReporter;
use super::sequencer::{Reply, ScriptedSequencer};

/// Scenario world for bootstrap steps.
pub struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    daemon: Option<Daemon>,
    bootstrap_error: Option<BootstrapError>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            daemon: None,
            bootstrap_error: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
        self.reset_results();
    }

    /// Installs a loader whose configuration has no sequencer URL.
    pub fn use_loader_without_url(&mut self) {
        self.loader = Box::new(UnreachableConfigLoader);
        self.reset_results();
    }

    /// Installs a loader that succeeds.
    pub fn use_successful_loader(&mut self) {
        self.loader = Box::new(TestConfigLoader::new());
        self.reset_results();
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.daemon.is_some() || self.bootstrap_error.is_some() {
            return;
        }
        match bootstrap_with(&*self.loader, self.reporter.clone()) {
            Ok(daemon) => self.daemon = Some(daemon),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Returns the bootstrap error, if any.
    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns the daemon handle when bootstrap succeeded.
    #[must_use]
    pub fn daemon(&self) -> Option<&Daemon> {
        self.daemon.as_ref()
    }

    fn reset_results(&mut self) {
        self.daemon = None;
        self.bootstrap_error = None;
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Default bootstrap world fixture.
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}

/// Sender used for scripted advance requests.
pub fn alice() -> Address {
    Address::new([0xa1; ADDRESS_LEN])
}

/// Contracts used by loop scenarios.
pub fn test_contracts() -> Contracts {
    Contracts {
        ether_portal: Address::new([0xee; ADDRESS_LEN]),
        dapp: Address::new([0xda; ADDRESS_LEN]),
    }
}

/// Retry policy that never sleeps.
pub fn instant_retry(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::ZERO, Duration::ZERO)
}

/// Scenario world for request-loop steps.
pub struct LoopWorld {
    pub sequencer: Arc<ScriptedSequencer>,
    pub reporter: Arc<RecordingHealthReporter>,
    runner: Runner<Arc<ScriptedSequencer>>,
    clock: u64,
}

impl LoopWorld {
    /// Builds a runner over a fresh ledger and an empty script.
    #[must_use]
    pub fn new() -> Self {
        let sequencer = Arc::new(ScriptedSequencer::default());
        let reporter = Arc::new(RecordingHealthReporter::default());
        let runner = Runner::new(
            Arc::clone(&sequencer),
            Dispatcher::new(test_contracts()),
            instant_retry(3),
            reporter.clone(),
        );
        Self {
            sequencer,
            reporter,
            runner,
            clock: 1_700_000_000,
        }
    }

    /// Queues an advance request from [`alice`], one second after the last.
    pub fn queue_advance(&mut self, line: &str) {
        self.clock += 1;
        self.sequencer.push(Reply::Request(RollupRequest::advance_text(
            alice(),
            self.clock,
            line,
        )));
    }

    /// Queues an inspect request.
    pub fn queue_inspect(&self, route: &str) {
        self.sequencer
            .push(Reply::Request(RollupRequest::inspect_text(route)));
    }

    /// Queues a failed poll.
    pub fn queue_outage(&self) {
        self.sequencer.push(Reply::Unavailable);
    }

    /// Advances the loop by `count` transitions.
    pub fn step(&mut self, count: u32) {
        for _ in 0..count {
            self.runner.step();
        }
    }

    /// Submitted payloads rendered as text.
    #[must_use]
    pub fn submitted_text(&self) -> Vec<(String, String)> {
        self.sequencer
            .submitted()
            .iter()
            .map(|output: &Output| {
                (
                    output.kind().to_string(),
                    String::from_utf8_lossy(output.payload()).into_owned(),
                )
            })
            .collect()
    }
}

impl Default for LoopWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Default request-loop world fixture.
pub fn loop_world() -> RefCell<LoopWorld> {
    RefCell::new(LoopWorld::new())
}
