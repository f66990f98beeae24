//! Runtime bootstrap orchestration.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use rollup_config::Config;

use crate::dispatch::Dispatcher;
use crate::health::HealthReporter;
use crate::runner::Runner;
use crate::sequencer::{HttpSequencer, SequencerClient, SequencerError};
use crate::settings::{ConfigError, Settings};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the runtime configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader that returns a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap. All of them are fatal.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// Configuration loaded but is unusable.
    #[error("invalid configuration: {source}")]
    Settings {
        /// Validation failure.
        #[source]
        source: ConfigError,
    },
    /// The sequencer client could not be built.
    #[error("failed to prepare sequencer client: {source}")]
    Sequencer {
        /// Client construction failure.
        #[source]
        source: SequencerError,
    },
}

/// Result of a successful bootstrap invocation.
pub struct Daemon {
    settings: Settings,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Daemon {
    /// Validated settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Subscriber installed for the process.
    #[must_use]
    pub fn telemetry(&self) -> &TelemetryHandle {
        &self.telemetry
    }

    /// Builds the HTTP client for the configured sequencer.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Sequencer`] when the client cannot be built.
    pub fn connect(&self) -> Result<HttpSequencer, BootstrapError> {
        HttpSequencer::new(self.settings.server_url(), self.settings.submit_timeout()).map_err(
            |source| {
                let error = BootstrapError::Sequencer { source };
                self.reporter.bootstrap_failed(&error);
                error
            },
        )
    }

    /// Builds a request loop over a fresh ledger.
    #[must_use]
    pub fn runner<S>(&self, sequencer: S) -> Runner<S>
    where
        S: SequencerClient,
    {
        Runner::new(
            sequencer,
            Dispatcher::new(self.settings.contracts()),
            self.settings.retry(),
            Arc::clone(&self.reporter),
        )
    }
}

/// Bootstraps the runtime using the supplied collaborators.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Daemon, BootstrapError> {
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let settings = match Settings::from_config(&config) {
        Ok(settings) => settings,
        Err(source) => {
            let error = BootstrapError::Settings { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    reporter.bootstrap_succeeded(&settings);

    Ok(Daemon {
        settings,
        telemetry,
        reporter,
    })
}
