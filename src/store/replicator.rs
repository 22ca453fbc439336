use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use crossbeam_channel::unbounded;
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use parking_lot::RwLock;
use tracing::debug;
use tracing::error;
use tracing::trace;

use crate::DataNode;
use crate::ReplicationError;
use crate::ShareData;

struct ReplicationTask {
    key: String,
    value: ShareData,
}

/// Background fan-out used in asynchronous replication mode.
///
/// A single worker thread consumes a FIFO queue, so replicas apply writes in
/// submission order. Since submissions happen under the key's write lock, the
/// per-key order matches the log.
pub(crate) struct Replicator {
    sender: RwLock<Option<Sender<ReplicationTask>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Replicator {
    pub(crate) fn start(replicas: Arc<Vec<DataNode>>) -> std::io::Result<Self> {
        let (sender, receiver) = unbounded::<ReplicationTask>();

        let handle = thread::Builder::new()
            .name("d-share-replicator".into())
            .spawn(move || {
                debug!(replicas = replicas.len(), "Replicator started");
                // Ends once every sender is dropped and the queue is empty
                for task in receiver.iter() {
                    for replica in replicas.iter() {
                        replica.put(&task.key, task.value.clone());
                    }
                    trace!(key = %task.key, version = task.value.version(), "Replicated");
                }
                debug!("Replicator stopped");
            })?;

        Ok(Self {
            sender: RwLock::new(Some(sender)),
            handle: Mutex::new(Some(handle)),
        })
    }

    pub(crate) fn submit(
        &self,
        key: &str,
        value: &ShareData,
    ) -> Result<(), ReplicationError> {
        let guard = self.sender.read();
        let stopped = || ReplicationError::ReplicatorStopped { key: key.to_string() };

        let sender = guard.as_ref().ok_or_else(stopped)?;
        sender
            .send(ReplicationTask {
                key: key.to_string(),
                value: value.clone(),
            })
            .map_err(|_| stopped())
    }

    /// Writes queued but not yet applied
    pub(crate) fn backlog(&self) -> usize {
        self.sender.read().as_ref().map(|s| s.len()).unwrap_or(0)
    }

    /// Stops accepting work, lets the worker apply everything already queued
    /// and joins it. Idempotent.
    pub(crate) fn shutdown(&self) {
        drop(self.sender.write().take());

        if let Some(handle) = self.handle.lock().take() {
            if handle.join().is_err() {
                error!("Replicator thread panicked");
            }
        }
    }
}

impl Drop for Replicator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
