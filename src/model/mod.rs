//! Record types shared by every layer of the hub.
//!
//! [`ShareData`] is the versioned value held by the store, [`LogRecord`] is the
//! write-ahead log entry built once per `set`. Neither carries behavior beyond
//! validated construction.

mod log_record;
mod share_data;


pub use log_record::*;
pub use share_data::*;
