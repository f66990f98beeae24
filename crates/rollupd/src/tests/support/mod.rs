//! Test harness utilities for the runtime's behavioural and unit suites.

mod config_loader;
mod fake_server;
mod reporter;
mod sequencer;
mod world;

pub use config_loader::{TEST_SERVER_URL, TestConfigLoader, UnreachableConfigLoader};
pub use fake_server::{CannedResponse, FakeSequencer};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use sequencer::{Reply, ScriptedSequencer};
pub use world::{LoopWorld, TestWorld, alice, instant_retry, loop_world, test_contracts, world};
