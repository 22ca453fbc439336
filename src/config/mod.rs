//! Configuration management module for the data-sharing hub.
//!
//! Provides hierarchical configuration loading and validation with:
//! - Default values as code base
//! - Optional settings file (`config/d-share.toml`, or `CONFIG_PATH`)
//! - Environment variable overrides (`DSHARE__` prefix)
//! - Component-wise validation
mod store;
mod wal;
mod watch;
pub use store::*;
pub use wal::*;
pub use watch::*;

use std::env;
use std::fmt::Debug;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_CONFIG_FILE;
use crate::constants::ENV_PREFIX;
use crate::Result;

/// Main configuration container for the hub components
///
/// Combines all subsystem configurations with hierarchical override support:
/// 1. Default values from code implementation
/// 2. Optional `config/d-share.toml` in the working directory
/// 3. Configuration file specified by `CONFIG_PATH`
/// 4. Environment variables (highest priority)
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct Settings {
    /// Topology and replication behavior
    #[serde(default)]
    pub store: StoreConfig,
    /// Write-ahead log location and durability
    #[serde(default)]
    pub wal: WalConfig,
    /// Notification delivery
    #[serde(default)]
    pub watch: WatchConfig,
}

impl Debug for Settings {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("store", &self.store)
            .field("wal", &self.wal)
            .field("watch", &self.watch)
            .finish()
    }
}

impl Settings {
    /// Loads configuration from hierarchical sources without validation.
    ///
    /// Configuration sources are merged in the following order (later sources override earlier):
    /// 1. Type defaults (lowest priority)
    /// 2. `config/d-share.toml` if present
    /// 3. Configuration file from `CONFIG_PATH` environment variable (if set)
    /// 4. Environment variables with `DSHARE__` prefix (highest priority)
    ///
    /// # Note
    /// Validation is deferred so callers can still apply `with_override_config()`.
    /// Callers MUST call `validate()` before using the configuration.
    ///
    /// # Examples
    /// ```ignore
    /// std::env::set_var("DSHARE__STORE__REPLICA_COUNT", "3");
    /// let settings = Settings::new()?.validate()?;
    /// ```
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path).required(true));
        }

        builder = builder.add_source(Self::env_source());

        let settings: Self = builder.build()?.try_deserialize()?;
        Ok(settings) // No validation - deferred to validate()
    }

    /// Applies additional configuration overrides from file without validation.
    ///
    /// Merging order (later sources override earlier):
    /// 1. Current configuration values
    /// 2. New configuration file
    /// 3. Latest environment variables (highest priority)
    pub fn with_override_config(
        &self,
        path: &str,
    ) -> Result<Self> {
        let settings: Self = Config::builder()
            .add_source(Config::try_from(self)?)
            .add_source(File::with_name(path))
            .add_source(Self::env_source())
            .build()?
            .try_deserialize()?;
        Ok(settings) // No validation - deferred to validate()
    }

    /// Validates configuration and returns validated instance.
    ///
    /// # Errors
    /// Returns validation errors from any subsystem:
    /// - Zero replicas
    /// - Empty WAL file name
    pub fn validate(self) -> Result<Self> {
        self.store.validate()?;
        self.wal.validate()?;
        self.watch.validate()?;
        Ok(self)
    }

    fn env_source() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .ignore_empty(true)
            .try_parsing(true)
    }
}
