use std::collections::HashSet;

use dashmap::DashMap;
use tracing::trace;

/// Pending watchers grouped by key.
///
/// Thread safety comes from the map itself and is independent of the per-key
/// value locks held by the store. `register` and `drain` on the same key
/// serialize on the key's shard, so a registration either lands in the set a
/// drain captures or in a fresh set for the next round, never both and never
/// neither.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    watchers: DashMap<String, HashSet<String>>,
}

impl WatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `watcher_id` to the set for `key`.
    ///
    /// Returns `false` when the watcher was already pending on that key.
    pub fn register(
        &self,
        key: &str,
        watcher_id: &str,
    ) -> bool {
        let added = self
            .watchers
            .entry(key.to_string())
            .or_default()
            .insert(watcher_id.to_string());

        trace!(key, watcher_id, added, "Watcher registered");
        added
    }

    /// Removes and returns every watcher pending on `key`.
    pub fn drain(
        &self,
        key: &str,
    ) -> HashSet<String> {
        self.watchers
            .remove(key)
            .map(|(_, watchers)| watchers)
            .unwrap_or_default()
    }

    pub fn is_watching(
        &self,
        key: &str,
        watcher_id: &str,
    ) -> bool {
        self.watchers
            .get(key)
            .map(|w| w.contains(watcher_id))
            .unwrap_or(false)
    }

    /// Get the number of pending watchers for a specific key
    pub fn watcher_count(
        &self,
        key: &str,
    ) -> usize {
        self.watchers.get(key).map(|w| w.len()).unwrap_or(0)
    }

    /// Get the total number of watched keys
    pub fn watched_key_count(&self) -> usize {
        self.watchers.len()
    }
}
