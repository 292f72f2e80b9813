//! Shared utilities: configuration loading and structured logging setup.

pub mod config;
pub mod error;
pub mod logging;

pub use config::IntentConfig;
pub use error::ConfigError;
pub use logging::{init_logging, LogFormat};
