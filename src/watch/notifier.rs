use std::fmt;

use crossbeam_channel::bounded;
use crossbeam_channel::unbounded;
use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use crossbeam_channel::TrySendError;
#[cfg(test)]
use mockall::automock;
use tracing::info;
use tracing::trace;

use crate::NotifyError;
use crate::WatchConfig;

/// Event type for watch notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchEventType {
    /// The watched key received a new committed value
    Change,
}

impl fmt::Display for WatchEventType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            WatchEventType::Change => f.write_str("CHANGE"),
        }
    }
}

/// A notification addressed to one watcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub watcher_id: String,
    pub key: String,
    pub event_type: WatchEventType,
}

/// Delivers change notifications to watchers.
///
/// Called from inside the key's write lock, so implementations must return
/// promptly. The store never retries a failed notification and does not wait
/// for acknowledgment.
#[cfg_attr(test, automock)]
pub trait Notifier: Send + Sync + 'static {
    fn notify(
        &self,
        watcher_id: &str,
        key: &str,
        event_type: WatchEventType,
    ) -> Result<(), NotifyError>;
}

/// Records every notification as a log line and reports success.
///
/// Stands in for a network transport the hub does not own.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(
        &self,
        watcher_id: &str,
        key: &str,
        event_type: WatchEventType,
    ) -> Result<(), NotifyError> {
        info!(watcher_id, key, %event_type, "Notify watcher");
        Ok(())
    }
}

/// Pushes notifications into a local queue.
///
/// Never blocks: a full bounded queue or a dropped receiver turns into a
/// [`NotifyError`] for that watcher.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: Sender<WatchEvent>,
}

impl ChannelNotifier {
    /// Creates the notifier and the receiving end of its queue.
    ///
    /// `notification_queue_size == 0` selects an unbounded queue.
    pub fn new(config: &WatchConfig) -> (Self, Receiver<WatchEvent>) {
        let (sender, receiver) = if config.notification_queue_size > 0 {
            bounded(config.notification_queue_size)
        } else {
            unbounded()
        };
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(
        &self,
        watcher_id: &str,
        key: &str,
        event_type: WatchEventType,
    ) -> Result<(), NotifyError> {
        let event = WatchEvent {
            watcher_id: watcher_id.to_string(),
            key: key.to_string(),
            event_type,
        };

        match self.sender.try_send(event) {
            Ok(()) => {
                trace!(watcher_id, key, "Watch event queued");
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(NotifyError::QueueFull(watcher_id.to_string())),
            Err(TrySendError::Disconnected(_)) => Err(NotifyError::ChannelClosed(watcher_id.to_string())),
        }
    }
}
