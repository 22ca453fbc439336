use std::collections::HashSet;

use dshare::read_log;
use dshare::SubscriberClient;
use dshare::WatchEventType;
use serde_json::json;
use tempfile::tempdir;

use crate::common::settings;
use crate::common::share;
use crate::common::start_store;
use crate::common::WAL_FILE;

#[test]
fn test_read_then_watch_then_change() {
    let dir = tempdir().unwrap();
    let (store, events) = start_store(settings(dir.path()));

    store.set("key1", share("id1", "v1", 1)).unwrap();

    let read = store.get("key1", Some("c1"), true).unwrap();
    assert_eq!(read.version(), 1);

    store.set("key1", share("id1", "v2", 2)).unwrap();

    let received: Vec<_> = events.try_iter().collect();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].watcher_id, "c1");
    assert_eq!(received[0].key, "key1");
    assert_eq!(received[0].event_type, WatchEventType::Change);

    let read = store.get("key1", None, false).unwrap();
    assert_eq!(read.version(), 2);
    assert_eq!(read.payload(), &json!("v2"));

    let records = read_log(dir.path().join(WAL_FILE)).unwrap();
    let versions: Vec<_> = records.iter().map(|r| r.value.version()).collect();
    assert_eq!(versions, vec![1, 2]);
}

#[test]
fn test_subscribers_walkthrough() {
    let dir = tempdir().unwrap();
    let (store, events) = start_store(settings(dir.path()));

    let c8080 = SubscriberClient::new("127.0.0.1:8080", store.clone());
    let c8081 = SubscriberClient::new("127.0.0.1:8081", store.clone());
    c8080.subscribe("key1");
    c8081.subscribe("key1");
    c8081.subscribe("key2");

    // First write to key1 reaches both key1 subscribers only
    store.set("key1", share("id1", "Initial Value for key1", 1)).unwrap();
    let first: HashSet<_> = events
        .try_iter()
        .map(|e| (e.watcher_id, e.key))
        .collect();
    assert_eq!(
        first,
        HashSet::from([
            ("127.0.0.1:8080".to_string(), "key1".to_string()),
            ("127.0.0.1:8081".to_string(), "key1".to_string()),
        ])
    );

    store.get("key1", Some("client1"), true).unwrap();
    store.set("key1", share("id1", "Updated Value for key1", 2)).unwrap();
    let second: Vec<_> = events.try_iter().collect();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].watcher_id, "client1");

    store.set("key2", share("id2", "Value for key2", 1)).unwrap();
    let third: Vec<_> = events.try_iter().collect();
    assert_eq!(third.len(), 1);
    assert_eq!(third[0].watcher_id, "127.0.0.1:8081");
    assert_eq!(third[0].key, "key2");

    let read = store.get("key1", None, false).unwrap();
    assert_eq!(read.version(), 2);
    assert_eq!(store.watcher_count("key1"), 0);
    assert_eq!(store.watcher_count("key2"), 0);
}

#[test]
fn test_missing_key_read_is_side_effect_free() {
    let dir = tempdir().unwrap();
    let (store, events) = start_store(settings(dir.path()));

    assert!(store.get("nothing", Some("w"), true).is_none());
    assert!(store.get("nothing", None, true).is_none());
    assert_eq!(store.watcher_count("nothing"), 0);

    store.set("nothing", share("id", "now something", 1)).unwrap();
    assert!(events.try_recv().is_err());
}
