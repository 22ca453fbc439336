use std::sync::atomic::Ordering;
use std::sync::Arc;

use dshare::ChannelNotifier;
use dshare::DataStoreBuilder;
use dshare::Error;
use dshare::StorageError;
use dshare::SystemError;

use crate::common::settings;
use crate::common::share;
use crate::common::FlakyWal;
use crate::enable_logger;

#[test]
fn test_failed_append_applies_nothing() {
    enable_logger();

    let settings = settings(std::path::Path::new("unused"));
    let (notifier, events) = ChannelNotifier::new(&settings.watch);
    let wal = Arc::new(FlakyWal::failing());
    let store = DataStoreBuilder::new(settings)
        .wal(wal.clone())
        .notifier(Arc::new(notifier))
        .build()
        .unwrap();

    store.register("k", "w");
    let err = store.set("k", share("id", "v", 1)).unwrap_err();
    assert!(matches!(
        err,
        Error::System(SystemError::Storage(StorageError::WalAppend { .. }))
    ));
    assert!(!err.is_write_applied());

    assert!(store.master_value("k").is_none());
    for i in 0..store.replica_count() {
        assert!(store.replica_value(i, "k").is_none());
    }
    assert!(store.is_watching("k", "w"));
    assert!(events.try_recv().is_err());

    // Once the log recovers the pending watcher gets the change
    wal.down.store(false, Ordering::SeqCst);
    let stored = store.set("k", share("id", "v", 1)).unwrap();
    assert_eq!(stored.version(), 1);
    assert_eq!(events.try_recv().unwrap().watcher_id, "w");
}

#[test]
fn test_unwritable_log_location_fails_build() {
    enable_logger();
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    // Parent of the log path is a regular file
    let result = DataStoreBuilder::new(settings(&blocker)).build();
    assert!(result.is_err());
}
