use dshare::ReplicationMode;
use dshare::Settings;
use serial_test::serial;
use tempfile::tempdir;

use crate::common::settings;
use crate::common::share;
use crate::common::start_store;

#[test]
fn test_async_mode_catches_up_on_shutdown() {
    let dir = tempdir().unwrap();
    let mut settings = settings(dir.path());
    settings.store.replication_mode = ReplicationMode::Asynchronous;
    let (store, _events) = start_store(settings);

    for i in 0..30 {
        store.set(&format!("k{}", i % 3), share("id", "v", 1)).unwrap();
    }
    store.shutdown();

    for k in 0..3 {
        let key = format!("k{}", k);
        let master = store.master_value(&key).unwrap();
        assert_eq!(master.version(), 10);
        for r in 0..store.replica_count() {
            assert_eq!(store.replica_value(r, &key), Some(master.clone()));
        }
    }
}

#[test]
#[serial]
fn test_mode_and_topology_from_env() {
    let dir = tempdir().unwrap();
    temp_env::with_vars(
        vec![
            ("DSHARE__STORE__REPLICA_COUNT", Some("4")),
            ("DSHARE__STORE__REPLICATION_MODE", Some("asynchronous")),
            ("DSHARE__WAL__DIR", Some(dir.path().to_str().unwrap())),
        ],
        || {
            let settings = Settings::new().unwrap().validate().unwrap();
            let (store, _events) = start_store(settings);

            assert_eq!(store.replica_count(), 4);
            assert_eq!(store.replication_mode(), ReplicationMode::Asynchronous);

            store.set("k", share("id", "v", 1)).unwrap();
            store.shutdown();
            assert!(store.replica_value(3, "k").is_some());
        },
    );
}
