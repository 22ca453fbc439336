use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// Duration since the unix epoch; a clock set before 1970 yields zero
pub(crate) fn get_duration_since_epoch() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

/// return millisecond
///
/// Wall-clock based, so only monotonic-enough for display. Never use it to
/// order writes.
pub fn timestamp_millis() -> i64 {
    get_duration_since_epoch().as_millis() as i64
}
