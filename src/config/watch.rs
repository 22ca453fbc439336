use serde::Deserialize;
use serde::Serialize;

use crate::Result;

/// Notification delivery settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WatchConfig {
    /// Capacity of the queue behind [`crate::ChannelNotifier`].
    ///
    /// `0` means unbounded. With a bound, a full queue drops the event and the
    /// triggering `set` reports a notification failure; it never blocks.
    #[serde(default)]
    pub notification_queue_size: usize,
}

impl WatchConfig {
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}
