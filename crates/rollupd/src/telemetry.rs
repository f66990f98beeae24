//! Tracing subscriber setup for the runtime.
//!
//! A bare level such as `debug` in the configured filter applies to the
//! runtime's own `rollupd::*` targets. Dependency crates (the HTTP stack in
//! particular) stay at [`DEPENDENCY_LEVEL`] or quieter unless the filter names
//! them explicitly. Any other expression is handed to [`EnvFilter`] as is.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use rollup_config::{Config, LogFormat};

/// Most verbose level dependency crates log at under a bare-level filter.
pub const DEPENDENCY_LEVEL: LevelFilter = LevelFilter::WARN;

static INSTALLED: OnceCell<TelemetryHandle> = OnceCell::new();

/// Describes the subscriber that is installed for the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
    directives: String,
}

impl TelemetryHandle {
    /// Line format of the installed subscriber.
    #[must_use]
    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Filter directives the subscriber was built with.
    #[must_use]
    pub fn directives(&self) -> &str {
        &self.directives
    }
}

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Installs the global subscriber on first use.
///
/// The first successful call wins. Later calls return its handle unchanged,
/// so tests that bootstrap repeatedly share one subscriber.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED.get_or_try_init(|| install(config)).cloned()
}

/// Expands a bare level into per-target directives.
pub(crate) fn directives(expression: &str) -> String {
    let expression = expression.trim();
    match expression.parse::<LevelFilter>() {
        Ok(level) => format!(
            "{},{}={level}",
            level.min(DEPENDENCY_LEVEL),
            env!("CARGO_PKG_NAME")
        ),
        Err(_) => expression.to_owned(),
    }
}

fn install(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    let handle = TelemetryHandle {
        format: config.log_format(),
        directives: directives(config.log_filter()),
    };
    let filter = EnvFilter::try_new(&handle.directives)
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let subscriber: Box<dyn Subscriber + Send + Sync> = match handle.format {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)?;
    Ok(handle)
}
