//! Validation of loaded configuration into typed runtime settings.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use rollup_config::Config;

use crate::address::{Address, AddressParseError};
use crate::dispatch::Contracts;
use crate::emitter::RetryPolicy;

/// Configuration values that are well-formed but unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No layer supplied the sequencer URL.
    #[error("http_server_url is required (set ROLLUP_HTTP_SERVER_URL or --http-server-url)")]
    MissingServerUrl,

    /// The sequencer URL did not parse.
    #[error("invalid http_server_url '{value}': {source}")]
    InvalidServerUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// The sequencer URL is not HTTP.
    #[error("http_server_url must use http or https, got '{scheme}'")]
    UnsupportedScheme { scheme: String },

    /// Submissions need at least one attempt.
    #[error("submit_attempts must be at least 1")]
    ZeroAttempts,

    /// A contract address did not parse.
    #[error("invalid {field} '{value}': {source}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        #[source]
        source: AddressParseError,
    },
}

/// Validated runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    server_url: Url,
    retry: RetryPolicy,
    submit_timeout: Duration,
    contracts: Contracts,
}

impl Settings {
    /// Validates `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the sequencer URL is missing or not
    /// HTTP(S), when `submit_attempts` is zero, or when a contract address is
    /// malformed.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let raw_url = config
            .http_server_url()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingServerUrl)?;
        let server_url = Url::parse(raw_url).map_err(|source| ConfigError::InvalidServerUrl {
            value: raw_url.to_owned(),
            source,
        })?;
        if !matches!(server_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: server_url.scheme().to_owned(),
            });
        }

        if config.submit_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        let retry = RetryPolicy::new(
            config.submit_attempts,
            Duration::from_millis(config.retry_backoff_ms),
            Duration::from_millis(config.retry_backoff_max_ms),
        );

        let contracts = Contracts {
            ether_portal: parse_address("ether_portal_address", &config.ether_portal_address)?,
            dapp: parse_address("dapp_address", &config.dapp_address)?,
        };

        Ok(Self {
            server_url,
            retry,
            submit_timeout: Duration::from_millis(config.submit_timeout_ms),
            contracts,
        })
    }

    /// Sequencer base URL.
    #[must_use]
    pub fn server_url(&self) -> &Url {
        &self.server_url
    }

    /// Retry schedule shared by submissions and polling.
    #[must_use]
    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Per-submission timeout.
    #[must_use]
    pub fn submit_timeout(&self) -> Duration {
        self.submit_timeout
    }

    /// Contracts recognised by the dispatcher.
    #[must_use]
    pub fn contracts(&self) -> Contracts {
        self.contracts
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, ConfigError> {
    value.parse().map_err(|source| ConfigError::InvalidAddress {
        field,
        value: value.to_owned(),
        source,
    })
}
