//! Durable side of the hub: the write-ahead log.
//!
//! The store appends one [`LogRecord`](crate::LogRecord) per `set` before any
//! in-memory mutation becomes visible. Nothing here is read back at runtime;
//! [`read_log`] exists for tooling and tests only.

mod wal;


pub use wal::*;
