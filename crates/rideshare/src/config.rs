//! Configuration management for rideshare.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::{Directory, DEFAULT_CAPACITY};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "rideshare";

/// Default data file name.
const DATA_FILE_NAME: &str = "ride_share_data.txt";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "RIDESHARE_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RIDESHARE_`, sections split on `__`,
///    e.g. `RIDESHARE_STORAGE__MAX_RECORDS=50`)
/// 2. TOML config file at `~/.config/rideshare/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the data file.
    /// Defaults to `~/.local/share/rideshare/ride_share_data.txt`
    pub data_file: Option<PathBuf>,
    /// Maximum number of registered students.
    pub max_records: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: None, // Will be resolved to default at runtime
            max_records: DEFAULT_CAPACITY,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file at `config_path`, or the default path (if it exists)
    /// 3. Environment variables (prefixed with `RIDESHARE_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.max_records == 0 {
            return Err(Error::ConfigValidation {
                message: "max_records must be greater than 0".to_string(),
            });
        }

        if let Some(path) = &self.storage.data_file {
            if path.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "data_file must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_file(&self) -> PathBuf {
        self.storage
            .data_file
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// Build the student directory described by this configuration.
    #[must_use]
    pub fn directory(&self) -> Directory {
        Directory::with_capacity(self.data_file(), self.storage.max_records)
    }
}
