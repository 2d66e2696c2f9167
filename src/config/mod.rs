//! Application configuration module
//!
//! Configuration is loaded from environment variables with the
//! `DECISION_DESK` prefix using the `config` and `dotenvy` crates. Nested
//! values are separated by double underscores. Every key has a default, so an
//! empty environment yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use decision_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Storing data in {}", config.storage.data_dir.display());
//! ```

mod error;
mod logging;
mod storage;
mod ui;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use storage::{StorageBackend, StorageConfig};
pub use ui::UiConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Persistence backend and location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Terminal presentation
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DECISION_DESK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `DECISION_DESK__STORAGE__BACKEND=memory` -> `storage.backend = memory`
    /// - `DECISION_DESK__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DECISION_DESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        self.logging.validate()?;
        self.ui.validate()?;
        Ok(())
    }
}
