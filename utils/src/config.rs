//! Intent service configuration with TOML file support.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LogFormat;

/// Configuration for the intent update service.
///
/// Can be loaded from a TOML file via [`IntentConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntentConfig {
    /// Upper bound on distinct validators in one delegator's intent.
    #[serde(default = "default_max_validators")]
    pub max_validators_per_intent: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_validators() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

impl IntentConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            max_validators_per_intent: default_max_validators(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
