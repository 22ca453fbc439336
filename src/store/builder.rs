//! Assembles a [`DataStore`] from [`Settings`] and optional component overrides.
//!
//! ```ignore
//! let store = DataStoreBuilder::new(Settings::new()?)
//!     .notifier(Arc::new(notifier))
//!     .build()?;
//! ```
//!
//! Any seam left unset gets its production default: a [`FileWal`] at the
//! configured path, a [`LogNotifier`] and a [`RandomSelector`] seeded from
//! `store.read_seed`.

use std::sync::Arc;

use tracing::info;

use super::replicator::Replicator;
use crate::constants::MASTER_NODE_ID;
use crate::DataNode;
use crate::DataStore;
use crate::FileWal;
use crate::KeyedLockManager;
use crate::LogNotifier;
use crate::NodeRole;
use crate::Notifier;
use crate::RandomSelector;
use crate::ReplicaSelector;
use crate::ReplicationMode;
use crate::Result;
use crate::Settings;
use crate::WatchRegistry;
use crate::WriteAheadLog;

pub struct DataStoreBuilder {
    settings: Settings,
    wal: Option<Arc<dyn WriteAheadLog>>,
    notifier: Option<Arc<dyn Notifier>>,
    selector: Option<Arc<dyn ReplicaSelector>>,
}

impl DataStoreBuilder {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            wal: None,
            notifier: None,
            selector: None,
        }
    }

    /// Replaces the file-backed log
    pub fn wal(
        mut self,
        wal: Arc<dyn WriteAheadLog>,
    ) -> Self {
        self.wal = Some(wal);
        self
    }

    pub fn notifier(
        mut self,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn replica_selector(
        mut self,
        selector: Arc<dyn ReplicaSelector>,
    ) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Validates the settings and builds the store.
    ///
    /// # Errors
    /// - Invalid settings
    /// - Log file cannot be opened (only when no log was supplied)
    /// - Replicator thread cannot be spawned (asynchronous mode)
    pub fn build(self) -> Result<DataStore> {
        let settings = self.settings.validate()?;
        let store_config = &settings.store;

        let wal = match self.wal {
            Some(wal) => wal,
            None => Arc::new(FileWal::open(&settings.wal)?) as Arc<dyn WriteAheadLog>,
        };
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(LogNotifier));
        let selector = self
            .selector
            .unwrap_or_else(|| Arc::new(RandomSelector::new(store_config.read_seed)));

        let replicas: Arc<Vec<DataNode>> = Arc::new(
            (1..=store_config.replica_count)
                .map(|i| DataNode::new(MASTER_NODE_ID + i as u32, NodeRole::Replica))
                .collect(),
        );

        let replicator = match store_config.replication_mode {
            ReplicationMode::Synchronous => None,
            ReplicationMode::Asynchronous => Some(Replicator::start(replicas.clone())?),
        };

        info!(
            replicas = store_config.replica_count,
            mode = ?store_config.replication_mode,
            "Data store built"
        );

        Ok(DataStore {
            master: DataNode::new(MASTER_NODE_ID, NodeRole::Master),
            replicas,
            locks: KeyedLockManager::new(),
            watches: WatchRegistry::new(),
            wal,
            notifier,
            selector,
            mode: store_config.replication_mode,
            replicator,
        })
    }
}

impl DataStore {
    /// Builds a store with every component at its default.
    pub fn new(settings: Settings) -> Result<Self> {
        DataStoreBuilder::new(settings).build()
    }
}
