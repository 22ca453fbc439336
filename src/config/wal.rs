use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_WAL_DIR;
use crate::constants::DEFAULT_WAL_FILE_NAME;
use crate::Error;
use crate::Result;

/// Write-ahead log settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WalConfig {
    /// Directory holding the log; created on open if missing
    #[serde(default = "default_wal_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_wal_file_name")]
    pub file_name: String,

    /// Call `fsync` after every append instead of only flushing to the OS.
    ///
    /// Off by default: the record is handed to the OS before `set` proceeds,
    /// which is all the hub promises.
    #[serde(default)]
    pub sync_on_append: bool,
}

impl Default for WalConfig {
    fn default() -> Self {
        Self {
            dir: default_wal_dir(),
            file_name: default_wal_file_name(),
            sync_on_append: false,
        }
    }
}

impl WalConfig {
    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(Error::Config(config::ConfigError::Message(
                "wal.file_name must not be empty".into(),
            )));
        }
        if self.file_name.contains(std::path::MAIN_SEPARATOR) {
            return Err(Error::Config(config::ConfigError::Message(format!(
                "wal.file_name must be a bare file name, got {}",
                self.file_name
            ))));
        }
        Ok(())
    }

    /// Full path of the log file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

fn default_wal_dir() -> PathBuf {
    PathBuf::from(DEFAULT_WAL_DIR)
}

fn default_wal_file_name() -> String {
    DEFAULT_WAL_FILE_NAME.to_string()
}
