use std::collections::HashMap;
use std::thread;

use dshare::read_log;
use tempfile::tempdir;

use crate::common::settings;
use crate::common::share;
use crate::common::start_store;
use crate::common::WAL_FILE;

const WRITERS: usize = 6;
const KEYS: usize = 3;
const WRITES_PER_WRITER: usize = 40;

#[test]
fn test_log_order_matches_store_per_key() {
    let dir = tempdir().unwrap();
    let (store, _events) = start_store(settings(dir.path()));

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..WRITES_PER_WRITER {
                    let key = format!("key{}", i % KEYS);
                    store
                        .set(&key, share(&format!("writer{}", w), &format!("{}-{}", w, i), 1))
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let records = read_log(dir.path().join(WAL_FILE)).unwrap();
    assert_eq!(records.len(), WRITERS * WRITES_PER_WRITER);

    // Per key, log versions are gap-free and the last one is what the store holds
    let mut last_by_key = HashMap::new();
    for record in &records {
        let expected = last_by_key.get(&record.key).map(|v| v + 1).unwrap_or(1);
        assert_eq!(record.value.version(), expected, "key {}", record.key);
        last_by_key.insert(record.key.clone(), record.value.version());
    }

    for k in 0..KEYS {
        let key = format!("key{}", k);
        let master = store.master_value(&key).unwrap();
        let logged = records.iter().rev().find(|r| r.key == key).unwrap();
        assert_eq!(master, logged.value);
        for r in 0..store.replica_count() {
            assert_eq!(store.replica_value(r, &key).as_ref(), Some(&master));
        }
    }
}

#[test]
fn test_watchers_registered_during_writes_get_one_event_each() {
    let dir = tempdir().unwrap();
    let (store, events) = start_store(settings(dir.path()));
    store.set("hot", share("id", "v", 1)).unwrap();

    let watchers: Vec<_> = (0..4)
        .map(|w| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..100 {
                    store.register("hot", &format!("w{}-{}", w, i));
                }
            })
        })
        .collect();
    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                store.set("hot", share("id", "v", 1)).unwrap();
            }
        })
    };
    for h in watchers {
        h.join().unwrap();
    }
    writer.join().unwrap();

    // Flush whatever registered after the last round
    store.set("hot", share("id", "v", 1)).unwrap();

    let mut seen = HashMap::new();
    for event in events.try_iter() {
        *seen.entry(event.watcher_id).or_insert(0) += 1;
    }
    assert_eq!(seen.len(), 400);
    assert!(seen.values().all(|n| *n == 1));
}
