use std::sync::Arc;

use tracing::debug;
use tracing::error;
use tracing::trace;
use tracing::warn;

use super::replicator::Replicator;
use crate::metrics::GET_TOTAL;
use crate::metrics::NOTIFICATION_TOTAL;
use crate::metrics::SET_TOTAL;
use crate::DataNode;
use crate::KeyedLockManager;
use crate::Notifier;
use crate::OperationKind;
use crate::ReplicaSelector;
use crate::ReplicationError;
use crate::ReplicationMode;
use crate::Result;
use crate::ShareData;
use crate::StoreError;
use crate::ValidationError;
use crate::WatchEventType;
use crate::WatchRegistry;
use crate::WriteAheadLog;

/// Keyed store with one master, N read replicas, per-key locks and one-shot
/// watches.
///
/// Build one with [`crate::DataStoreBuilder`]. Independent instances share
/// nothing but the process-wide metrics.
pub struct DataStore {
    pub(super) master: DataNode,
    pub(super) replicas: Arc<Vec<DataNode>>,
    pub(super) locks: KeyedLockManager,
    pub(super) watches: WatchRegistry,
    pub(super) wal: Arc<dyn WriteAheadLog>,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) selector: Arc<dyn ReplicaSelector>,
    pub(super) mode: ReplicationMode,
    /// Present only in asynchronous mode
    pub(super) replicator: Option<Replicator>,
}

impl DataStore {
    /// Reads `key` from a randomly chosen replica.
    ///
    /// When `should_watch` is set, `watcher_id` is non-empty and the key holds
    /// a value, the watcher is registered for the next change before
    /// returning. A miss never registers.
    pub fn get(
        &self,
        key: &str,
        watcher_id: Option<&str>,
        should_watch: bool,
    ) -> Option<ShareData> {
        let lock = self.locks.lock_for(key);
        let _guard = lock.read();

        let replica = self.read_replica();
        let value = replica.get(key);

        match &value {
            Some(_) => {
                GET_TOTAL.with_label_values(&["hit"]).inc();
                if should_watch {
                    if let Some(watcher_id) = watcher_id.filter(|w| !w.is_empty()) {
                        self.watches.register(key, watcher_id);
                    }
                }
            }
            None => GET_TOTAL.with_label_values(&["miss"]).inc(),
        }

        trace!(key, replica = replica.id(), hit = value.is_some(), "get");
        value
    }

    /// Commits `value` under `key` and returns what was stored.
    ///
    /// If the key already holds a value, the stored version is the previous
    /// one plus one regardless of what `value` carried.
    ///
    /// # Errors
    /// - Empty key, or log append failure: nothing was applied.
    /// - Replication or notification failure: the write was applied, see
    ///   [`crate::Error::is_write_applied`].
    pub fn set(
        &self,
        key: &str,
        value: ShareData,
    ) -> Result<ShareData> {
        if key.is_empty() {
            SET_TOTAL.with_label_values(&["rejected"]).inc();
            return Err(ValidationError::EmptyKey.into());
        }

        let lock = self.locks.lock_for(key);
        let _guard = lock.write();

        let mut value = value;
        if let Some(previous) = self.master.get(key) {
            if let Err(e) = value.succeed(&previous) {
                SET_TOTAL.with_label_values(&["rejected"]).inc();
                warn!(key, version = previous.version(), "Write rejected: {}", e);
                return Err(e);
            }
        }

        if let Err(e) = self.wal.append(OperationKind::Set, key, &value) {
            SET_TOTAL.with_label_values(&["wal_failed"]).inc();
            warn!(key, "Write aborted, log append failed: {:?}", e);
            return Err(e);
        }

        self.master.put(key, value.clone());
        debug!(key, version = value.version(), "Master updated");

        if let Err(e) = self.fan_out(key, &value) {
            SET_TOTAL.with_label_values(&["replication_failed"]).inc();
            error!(key, version = value.version(), "Fan-out failed after commit: {:?}", e);
            return Err(e.into());
        }

        if let Err(e) = self.notify_watchers(key) {
            SET_TOTAL.with_label_values(&["notification_failed"]).inc();
            return Err(e.into());
        }

        SET_TOTAL.with_label_values(&["ok"]).inc();
        Ok(value)
    }

    /// Registers `watcher_id` for the next change of `key`.
    ///
    /// Idempotent. An empty id is ignored.
    pub fn register(
        &self,
        key: &str,
        watcher_id: &str,
    ) {
        if watcher_id.is_empty() {
            debug!(key, "Ignoring registration with empty watcher id");
            return;
        }
        self.watches.register(key, watcher_id);
    }

    fn read_replica(&self) -> &DataNode {
        let index = self.selector.select(self.replicas.len());
        // Out-of-range picks from custom selectors wrap around
        &self.replicas[index % self.replicas.len()]
    }

    fn fan_out(
        &self,
        key: &str,
        value: &ShareData,
    ) -> std::result::Result<(), ReplicationError> {
        match &self.replicator {
            Some(replicator) => replicator.submit(key, value),
            None => {
                for replica in self.replicas.iter() {
                    replica.put(key, value.clone());
                }
                trace!(key, replicas = self.replicas.len(), "Replicas updated");
                Ok(())
            }
        }
    }

    fn notify_watchers(
        &self,
        key: &str,
    ) -> std::result::Result<(), StoreError> {
        let watchers = self.watches.drain(key);
        if watchers.is_empty() {
            return Ok(());
        }

        let mut failed = Vec::new();
        for watcher_id in watchers {
            match self.notifier.notify(&watcher_id, key, WatchEventType::Change) {
                Ok(()) => NOTIFICATION_TOTAL.with_label_values(&["delivered"]).inc(),
                Err(e) => {
                    NOTIFICATION_TOTAL.with_label_values(&["failed"]).inc();
                    warn!(key, watcher_id = %watcher_id, "Notification failed: {}", e);
                    failed.push((watcher_id, e));
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Notification {
                key: key.to_string(),
                failed,
            })
        }
    }

    // ---- Inspection ----

    /// Value currently in the master map
    pub fn master_value(
        &self,
        key: &str,
    ) -> Option<ShareData> {
        self.master.get(key)
    }

    /// Value held by one replica, `None` when the index is out of range
    pub fn replica_value(
        &self,
        replica: usize,
        key: &str,
    ) -> Option<ShareData> {
        self.replicas.get(replica).and_then(|r| r.get(key))
    }

    pub fn replica_count(&self) -> usize {
        self.replicas.len()
    }

    pub fn replication_mode(&self) -> ReplicationMode {
        self.mode
    }

    /// Number of per-key locks created so far
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    /// Watchers pending on `key`
    pub fn watcher_count(
        &self,
        key: &str,
    ) -> usize {
        self.watches.watcher_count(key)
    }

    pub fn is_watching(
        &self,
        key: &str,
        watcher_id: &str,
    ) -> bool {
        self.watches.is_watching(key, watcher_id)
    }

    /// Drops the locks of keys no operation is currently using. Returns how
    /// many were removed.
    pub fn evict_idle_locks(&self) -> usize {
        self.locks.evict_idle()
    }

    /// Replica writes still queued in asynchronous mode
    pub fn replication_backlog(&self) -> usize {
        self.replicator.as_ref().map(|r| r.backlog()).unwrap_or(0)
    }

    /// Drains pending replica writes and stops the background replicator.
    ///
    /// A no-op in synchronous mode. After shutdown, `set` in asynchronous mode
    /// fails with a replication error (the master is still updated).
    pub fn shutdown(&self) {
        if let Some(replicator) = &self.replicator {
            replicator.shutdown();
            debug!("Data store replicator shut down");
        }
    }
}

impl std::fmt::Debug for DataStore {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("DataStore")
            .field("keys", &self.master.len())
            .field("replicas", &self.replicas.len())
            .field("mode", &self.mode)
            .field("locks", &self.locks.len())
            .finish()
    }
}
