//! Data-share Error Hierarchy
//!
//! Defines the error types of the in-process data-sharing hub, categorized by
//! layer: infrastructure (I/O, serialization), configuration, and the data
//! plane (validation, replication fan-out, watcher notification).

use std::path::PathBuf;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Infrastructure-level failures (disk, serialization)
    #[error(transparent)]
    System(#[from] SystemError),

    /// Settings loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Data plane failures raised by the store
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// Whether a failed `set` still left its write in the log, the master and
    /// (in synchronous mode) the replicas.
    ///
    /// Only failures raised after the log append carry this flag; there is no
    /// rollback for them.
    pub fn is_write_applied(&self) -> bool {
        matches!(
            self,
            Error::Store(StoreError::Replication(_)) | Error::Store(StoreError::Notification { .. })
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    // Storage layer
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    // Serialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Disk I/O failures during log operations
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// I/O failure tied to a concrete file or directory
    #[error("Error occurred at path: {path}: {source}")]
    PathError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A log record could not be appended; nothing was applied
    #[error("WAL append failed for key {key}: {source}")]
    WalAppend {
        key: String,
        source: std::io::Error,
    },
}

// Serialization is classified separately (log encoding and log inspection)
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("Json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed line found while inspecting a log file
    #[error("Malformed log record at line {line}: {source}")]
    MalformedRecord {
        line: usize,
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Rejected input, raised before any side effect
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Fan-out to replicas failed after the master write
    #[error(transparent)]
    Replication(#[from] ReplicationError),

    /// One or more watchers could not be notified after the write
    #[error("Write for key {key} applied but {} watcher notification(s) failed", failed.len())]
    Notification {
        key: String,
        failed: Vec<(String, NotifyError)>,
    },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ShareData id must not be empty")]
    EmptyId,

    #[error("ShareData payload must not be null")]
    NullPayload,

    #[error("Key must not be empty")]
    EmptyKey,

    /// The key already holds the largest representable version
    #[error("Version overflow: key is already at u64::MAX")]
    VersionOverflow,
}

#[derive(Debug, thiserror::Error)]
pub enum ReplicationError {
    /// Background replicator no longer accepts work (asynchronous mode)
    #[error("Replicator stopped; key {key} was not queued for replicas")]
    ReplicatorStopped { key: String },
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// Receiving side of the notification queue has gone away
    #[error("Notification channel for watcher {0} is closed")]
    ChannelClosed(String),

    /// Bounded notification queue is full; the event was dropped
    #[error("Notification queue full, dropped event for watcher {0}")]
    QueueFull(String),

    /// Transport-specific delivery failure
    #[error("Delivery to watcher {watcher_id} failed: {reason}")]
    Delivery { watcher_id: String, reason: String },
}

// ============== Conversion Implementations ============== //
impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::System(SystemError::Storage(e))
    }
}

impl From<SerializationError> for Error {
    fn from(e: SerializationError) -> Self {
        Error::System(SystemError::Serialization(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::System(SystemError::Serialization(SerializationError::Json(e)))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::System(SystemError::Storage(StorageError::IoError(e)))
    }
}

// ===== Store Error conversions =====

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Store(StoreError::Validation(e))
    }
}

impl From<ReplicationError> for Error {
    fn from(e: ReplicationError) -> Self {
        Error::Store(StoreError::Replication(e))
    }
}
