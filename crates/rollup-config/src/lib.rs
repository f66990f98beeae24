//! Shared configuration for the rollup execution runtime.
//!
//! Values are layered by `ortho_config`: command-line flags override
//! environment variables (prefixed `ROLLUP_`), which override TOML files
//! supplied through `--config-path` or `ROLLUP_CONFIG_PATH`, which override the
//! built-in defaults in [`defaults`]. The sequencer address is deliberately
//! left without a default; the daemon refuses to start when it is missing.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_DAPP_ADDRESS, DEFAULT_ETHER_PORTAL_ADDRESS, DEFAULT_LOG_FILTER,
    DEFAULT_RETRY_BACKOFF_MAX_MS, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_SUBMIT_ATTEMPTS,
    DEFAULT_SUBMIT_TIMEOUT_MS, default_dapp_address, default_ether_portal_address,
    default_log_filter, default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration resolved from CLI, environment, and files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ROLLUP")]
pub struct Config {
    /// Base URL of the sequencer's rollup HTTP server.
    #[serde(default)]
    pub http_server_url: Option<String>,
    /// Tracing filter expression, e.g. `info` or `rollupd=debug`.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Log line format.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Attempts made for each report, notice, or voucher submission.
    #[ortho_config(default = defaults::DEFAULT_SUBMIT_ATTEMPTS)]
    pub submit_attempts: u32,
    /// First retry delay in milliseconds; doubles on each further attempt.
    #[ortho_config(default = defaults::DEFAULT_RETRY_BACKOFF_MS)]
    pub retry_backoff_ms: u64,
    /// Ceiling for the retry delay in milliseconds.
    #[ortho_config(default = defaults::DEFAULT_RETRY_BACKOFF_MAX_MS)]
    pub retry_backoff_max_ms: u64,
    /// Timeout for a single output submission in milliseconds.
    #[ortho_config(default = defaults::DEFAULT_SUBMIT_TIMEOUT_MS)]
    pub submit_timeout_ms: u64,
    /// Address whose advance inputs carry ether deposits.
    #[ortho_config(default = defaults::default_ether_portal_address())]
    pub ether_portal_address: String,
    /// Application contract that executes ether withdrawal vouchers.
    #[ortho_config(default = defaults::default_dapp_address())]
    pub dapp_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_server_url: None,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            submit_attempts: DEFAULT_SUBMIT_ATTEMPTS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            retry_backoff_max_ms: DEFAULT_RETRY_BACKOFF_MAX_MS,
            submit_timeout_ms: DEFAULT_SUBMIT_TIMEOUT_MS,
            ether_portal_address: default_ether_portal_address(),
            dapp_address: default_dapp_address(),
        }
    }
}

impl Config {
    /// Configured sequencer URL, if any layer supplied one.
    #[must_use]
    pub fn http_server_url(&self) -> Option<&str> {
        self.http_server_url.as_deref()
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log line format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
