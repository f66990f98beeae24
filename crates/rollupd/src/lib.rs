//! Off-chain execution runtime for an optimistic rollup application.
//!
//! The runtime pulls requests from a sequencer over HTTP, applies them to an
//! in-memory ledger, and pushes the resulting reports, notices, and vouchers
//! back before asking for the next request. Configuration is loaded through
//! [`rollup_config`]; every stage of bootstrap and of the request loop emits
//! structured telemetry through a [`HealthReporter`].
//!
//! ## Request loop
//!
//! One request is in flight at a time. The verdict for an advance request is
//! not sent on its own: it rides on the next `POST /finish`, which is also how
//! the runtime asks for more work. Inspect requests read state and never
//! affect the verdict.
//!
//! ## Ledger
//!
//! The application state combines a company payroll, timed auctions, an
//! uppercasing counter, and an ether wallet fed by portal deposits. State
//! transitions are deterministic: replicas fed the same requests end up with
//! identical state and identical outputs.

pub mod address;
mod bootstrap;
pub mod codec;
pub mod dispatch;
mod emitter;
mod health;
pub mod ledger;
mod process;
mod runner;
pub mod sequencer;
mod settings;
mod telemetry;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use emitter::{OutputEmitter, RetryPolicy};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::run_daemon;
pub use runner::{LoopState, Runner};
pub use settings::{ConfigError, Settings};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
