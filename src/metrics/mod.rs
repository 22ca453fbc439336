//! Process-wide Prometheus counters.
//!
//! Counters are global, so every store in the process feeds the same series.
//! [`gather`] renders [`struct@REGISTRY`] in the text exposition format.

use lazy_static::lazy_static;
use prometheus::Encoder;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::Opts;
use prometheus::Registry;
use prometheus::TextEncoder;
use tracing::warn;


lazy_static! {
    /// `set` calls by outcome: ok, rejected, wal_failed, replication_failed,
    /// notification_failed
    pub static ref SET_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("dshare_set_total", "set calls by outcome"),
        &["outcome"]
    )
    .expect("metric can not be created");

    /// `get` calls by result: hit, miss
    pub static ref GET_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("dshare_get_total", "get calls by result"),
        &["result"]
    )
    .expect("metric can not be created");

    /// Watcher notifications by outcome: delivered, failed
    pub static ref NOTIFICATION_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("dshare_notification_total", "watcher notifications by outcome"),
        &["outcome"]
    )
    .expect("metric can not be created");

    pub static ref WAL_APPEND_FAILURES: IntCounter = IntCounter::new(
        "dshare_wal_append_failures",
        "file log appends that failed"
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = {
        let registry = Registry::new();
        if let Err(e) = register_custom_metrics(&registry) {
            warn!("could not register metrics: {}", e);
        }
        registry
    };
}

/// Registers every counter of this module into `registry`.
pub fn register_custom_metrics(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(SET_TOTAL.clone()))?;
    registry.register(Box::new(GET_TOTAL.clone()))?;
    registry.register(Box::new(NOTIFICATION_TOTAL.clone()))?;
    registry.register(Box::new(WAL_APPEND_FAILURES.clone()))?;
    Ok(())
}

/// Renders the crate registry in the Prometheus text format
pub fn gather() -> String {
    let encoder = TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        warn!("could not encode metrics: {}", e);
    }

    match String::from_utf8(buffer) {
        Ok(v) => v,
        Err(e) => {
            warn!("metrics could not be from_utf8'd: {}", e);
            String::default()
        }
    }
}
