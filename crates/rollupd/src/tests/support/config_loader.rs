//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use rollup_config::Config;

use crate::bootstrap::ConfigLoader;

/// Sequencer URL used by loaders that should bootstrap cleanly. Nothing
/// listens there; bootstrap never connects.
pub const TEST_SERVER_URL: &str = "http://127.0.0.1:5004";

/// Loader that yields a complete, valid configuration.
#[derive(Debug, Default)]
pub struct TestConfigLoader;

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            http_server_url: Some(TEST_SERVER_URL.to_owned()),
            log_format: rollup_config::LogFormat::Compact,
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing invalid CLI arguments.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("rollupd"),
            OsString::from("--submit-attempts"),
            OsString::from("many"),
        ];
        Config::load_from_iter(args)
    }
}

/// Loader whose configuration parses but lacks the sequencer URL.
pub struct UnreachableConfigLoader;

impl ConfigLoader for UnreachableConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config::default())
    }
}
