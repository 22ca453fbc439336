use std::sync::Arc;

use dshare::DataStore;
use dshare::Result;
use dshare::Settings;
use dshare::ShareData;
use dshare::SubscriberClient;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_observability();

    let settings = Settings::new()?.validate()?;
    let store = Arc::new(DataStore::new(settings)?);

    // Client on 8080 watches key1; client on 8081 watches key1 and key2
    let client_8080 = SubscriberClient::new("127.0.0.1:8080", store.clone());
    client_8080.subscribe("key1");
    let client_8081 = SubscriberClient::new("127.0.0.1:8081", store.clone());
    client_8081.subscribe("key1");
    client_8081.subscribe("key2");

    println!("\nSetting data for key1...");
    commit(&store, "key1", ShareData::new("id1", "Initial Value for key1", 1)?);

    println!("\nGetting data for key1 by client1 (will re-register watcher)...");
    let data = store.get("key1", Some("client1_ip:port"), true);
    println!("Client1 got: {:?}", data);

    println!("\nSetting data for key1 again (client1 should be notified)...");
    commit(&store, "key1", ShareData::new("id1", "Updated Value for key1", 2)?);

    println!("\nSetting data for key2...");
    commit(&store, "key2", ShareData::new("id2", "Value for key2", 1)?);

    println!("\nClient2 getting data for key1 (sets a watch now)...");
    let data = store.get("key1", Some("client2_ip:port"), true);
    println!("Client2 got (for key1): {:?}", data);

    println!("\nReading key1 from a random replica without watching:");
    let data = store.get("key1", None, false);
    println!("Read from replica for key1: {:?}", data);

    store.shutdown();
    info!("Metrics:\n{}", dshare::metrics::gather());
    println!("Exiting program.");
    Ok(())
}

fn commit(
    store: &DataStore,
    key: &str,
    value: ShareData,
) {
    match store.set(key, value) {
        Ok(stored) => info!(key, version = stored.version(), "Set succeeded"),
        Err(e) if e.is_write_applied() => error!(key, "Set applied with errors: {}", e),
        Err(e) => error!(key, "Set failed: {}", e),
    }
}

fn init_observability() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
