use std::sync::Arc;

use tracing::debug;

use crate::DataStore;
use crate::ShareData;

/// A watcher identity bound to one store.
///
/// The id is usually the subscriber's `ip:port`. Every read goes through
/// [`DataStore::get`] with `should_watch` set, so reading a key also arms a
/// notification for its next change.
#[derive(Clone)]
pub struct SubscriberClient {
    watcher_id: String,
    store: Arc<DataStore>,
}

impl SubscriberClient {
    pub fn new(
        watcher_id: impl Into<String>,
        store: Arc<DataStore>,
    ) -> Self {
        Self {
            watcher_id: watcher_id.into(),
            store,
        }
    }

    pub fn watcher_id(&self) -> &str {
        &self.watcher_id
    }

    /// Watches `key` without reading it. Works for keys with no value yet.
    pub fn subscribe(
        &self,
        key: &str,
    ) {
        debug!(watcher_id = %self.watcher_id, key, "Subscribe");
        self.store.register(key, &self.watcher_id);
    }

    /// Reads `key` and re-arms the watch when a value is found.
    pub fn get(
        &self,
        key: &str,
    ) -> Option<ShareData> {
        self.store.get(key, Some(&self.watcher_id), true)
    }
}

impl std::fmt::Debug for SubscriberClient {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("SubscriberClient")
            .field("watcher_id", &self.watcher_id)
            .finish()
    }
}
