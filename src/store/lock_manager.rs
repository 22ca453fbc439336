use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;
use tracing::trace;

/// The read/write lock guarding one key
pub type KeyLock = Arc<RwLock<()>>;

/// Lazily creates one read/write lock per key.
///
/// A lock is created on first access and then shared by every operation on
/// that key. Locks are never dropped on their own, so the map grows with the
/// number of distinct keys ever touched; [`KeyedLockManager::evict_idle`]
/// reclaims locks nobody is holding.
#[derive(Debug, Default)]
pub struct KeyedLockManager {
    locks: DashMap<String, KeyLock>,
}

impl KeyedLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `key`, creating it if this is the first access.
    pub fn lock_for(
        &self,
        key: &str,
    ) -> KeyLock {
        if let Some(lock) = self.locks.get(key) {
            return lock.value().clone();
        }

        self.locks
            .entry(key.to_string())
            .or_insert_with(|| {
                trace!(key, "Key lock created");
                Arc::new(RwLock::new(()))
            })
            .value()
            .clone()
    }

    /// Number of keys with a lock
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Drops every lock that no caller currently holds a handle to.
    ///
    /// A handle still out (guarded or not) keeps its lock alive, so two
    /// callers can never end up with different locks for the same key.
    /// Returns how many locks were removed.
    pub fn evict_idle(&self) -> usize {
        let mut evicted = 0;
        self.locks.retain(|_, lock| {
            // The map's own reference is the only one left
            let idle = Arc::strong_count(lock) == 1;
            if idle {
                evicted += 1;
            }
            !idle
        });

        debug!(evicted, remaining = self.locks.len(), "Idle key locks evicted");
        evicted
    }
}
