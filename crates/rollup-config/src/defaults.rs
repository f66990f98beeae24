//! Built-in defaults applied when no layer supplies a value.

use crate::logging::LogFormat;

/// Default log filter expression used by the runtime.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default number of attempts made for each output submission.
pub const DEFAULT_SUBMIT_ATTEMPTS: u32 = 5;

/// Initial delay between retried sequencer calls, in milliseconds.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 200;

/// Upper bound for the exponential retry delay, in milliseconds.
pub const DEFAULT_RETRY_BACKOFF_MAX_MS: u64 = 5_000;

/// Per-call timeout applied to output submissions, in milliseconds.
pub const DEFAULT_SUBMIT_TIMEOUT_MS: u64 = 10_000;

/// Ether portal contract on the local development chain.
pub const DEFAULT_ETHER_PORTAL_ADDRESS: &str = "0xffdbe43d4c855bf7e0f105c400a50857f53ab044";

/// Application contract on the local development chain.
pub const DEFAULT_DAPP_ADDRESS: &str = "0xab7528bb862fb57e8a2bcd567a2e929a0be56a5e";

/// Default log filter expression used by the runtime.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the runtime.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Owned ether portal address.
#[must_use]
pub fn default_ether_portal_address() -> String {
    DEFAULT_ETHER_PORTAL_ADDRESS.to_owned()
}

/// Owned application contract address.
#[must_use]
pub fn default_dapp_address() -> String {
    DEFAULT_DAPP_ADDRESS.to_owned()
}
