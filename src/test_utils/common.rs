use std::path::Path;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use tracing_subscriber::EnvFilter;

use crate::ChannelNotifier;
use crate::DataStore;
use crate::DataStoreBuilder;
use crate::MockNotifier;
use crate::MockWriteAheadLog;
use crate::Settings;
use crate::ShareData;
use crate::WatchEvent;

static LOGGER_INIT: once_cell::sync::Lazy<()> = once_cell::sync::Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

pub fn enable_logger() {
    *LOGGER_INIT;
}

/// Default settings with the log under `dir` and a fixed read seed
pub fn test_settings(dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.wal.dir = dir.to_path_buf();
    settings.store.read_seed = Some(7);
    settings
}

pub fn share_data(
    id: &str,
    payload: &str,
    version: u64,
) -> ShareData {
    ShareData::new(id, payload, version).expect("valid test data")
}

/// File-backed store whose notifications land in the returned receiver
pub fn channel_store(dir: &Path) -> (DataStore, Receiver<WatchEvent>) {
    enable_logger();

    let settings = test_settings(dir);
    let (notifier, events) = ChannelNotifier::new(&settings.watch);
    let store = DataStoreBuilder::new(settings)
        .notifier(Arc::new(notifier))
        .build()
        .expect("store should build");
    (store, events)
}

/// Store whose log and notifier are mocks. No file is touched.
pub fn mock_store(
    wal: MockWriteAheadLog,
    notifier: MockNotifier,
) -> DataStore {
    enable_logger();

    DataStoreBuilder::new(test_settings(Path::new("unused")))
        .wal(Arc::new(wal))
        .notifier(Arc::new(notifier))
        .build()
        .expect("store should build")
}
