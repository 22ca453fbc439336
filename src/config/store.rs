use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_REPLICA_COUNT;
use crate::Error;
use crate::Result;

/// How a committed master write reaches the replicas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplicationMode {
    /// Replicas are written inside the key's write lock. A reader never sees a
    /// replica older than the last completed `set` for that key.
    #[default]
    Synchronous,

    /// Replica writes are queued to a background replicator after the master
    /// write. Reads may return a stale value, or nothing, until the replicator
    /// catches up. Per-key write order is still preserved on every replica.
    Asynchronous,
}

/// Topology and replication settings of a data store
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    /// Number of replica maps beside the master. Reads are served from these.
    #[serde(default = "default_replica_count")]
    pub replica_count: usize,

    #[serde(default)]
    pub replication_mode: ReplicationMode,

    /// Seed for replica selection. `None` seeds from OS entropy; set it to get
    /// a reproducible read distribution.
    #[serde(default)]
    pub read_seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            replica_count: default_replica_count(),
            replication_mode: ReplicationMode::default(),
            read_seed: None,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.replica_count == 0 {
            return Err(Error::Config(config::ConfigError::Message(
                "store.replica_count must be at least 1".into(),
            )));
        }
        Ok(())
    }
}

fn default_replica_count() -> usize {
    DEFAULT_REPLICA_COUNT
}
