use std::io;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use dshare::ChannelNotifier;
use dshare::DataStore;
use dshare::DataStoreBuilder;
use dshare::OperationKind;
use dshare::Result;
use dshare::Settings;
use dshare::ShareData;
use dshare::StorageError;
use dshare::WatchEvent;
use dshare::WriteAheadLog;

use crate::enable_logger;

pub const WAL_FILE: &str = "master_wal.log";

pub fn settings(dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.wal.dir = dir.to_path_buf();
    settings
}

pub fn share(
    id: &str,
    payload: &str,
    version: u64,
) -> ShareData {
    ShareData::new(id, payload, version).unwrap()
}

/// File-backed store with a channel notifier
pub fn start_store(settings: Settings) -> (Arc<DataStore>, Receiver<WatchEvent>) {
    enable_logger();

    let (notifier, events) = ChannelNotifier::new(&settings.watch);
    let store = DataStoreBuilder::new(settings)
        .notifier(Arc::new(notifier))
        .build()
        .unwrap();
    (Arc::new(store), events)
}

/// Log that fails every append while `down` is set
#[derive(Default)]
pub struct FlakyWal {
    pub down: AtomicBool,
}

impl FlakyWal {
    pub fn failing() -> Self {
        Self {
            down: AtomicBool::new(true),
        }
    }
}

impl WriteAheadLog for FlakyWal {
    fn append(
        &self,
        _operation: OperationKind,
        key: &str,
        _value: &ShareData,
    ) -> Result<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StorageError::WalAppend {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::Other, "device unavailable"),
            }
            .into());
        }
        Ok(())
    }
}
