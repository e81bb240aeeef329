//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MARKETPLACE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use marketplace_client::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Cart stored under {}", config.storage.data_dir.display());
//! ```

mod database;
mod error;
mod logging;
mod storage;
mod wishlist;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::StorageConfig;
pub use wishlist::WishlistConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration backed by local storage and in-memory remote tables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Local cart persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Remote tables; in-memory adapters are used when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Wishlist cache behaviour
    #[serde(default)]
    pub wishlist: WishlistConfig,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MARKETPLACE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MARKETPLACE__STORAGE__DATA_DIR=/var/lib/market` -> `storage.data_dir`
    /// - `MARKETPLACE__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MARKETPLACE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.storage.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.logging.validate()?;
        Ok(())
    }

    /// Whether remote tables are backed by PostgreSQL
    pub fn has_database(&self) -> bool {
        self.database.is_some()
    }
}
