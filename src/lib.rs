//! # d-share
//!
//! An in-process data-sharing hub: a keyed store that clients read, write and
//! watch for one-shot change notifications. Every write is appended to a
//! write-ahead log, applied to a master map and fanned out to N replica maps;
//! reads are served by a randomly chosen replica.
//!
//! ```ignore
//! use std::sync::Arc;
//! use dshare::{DataStore, Settings, ShareData, SubscriberClient};
//!
//! let store = Arc::new(DataStore::new(Settings::new()?.validate()?)?);
//! let client = SubscriberClient::new("127.0.0.1:7001", store.clone());
//!
//! client.subscribe("key1");
//! store.set("key1", ShareData::new("id1", "v1", 1)?)?; // notifies the client once
//! ```

mod client;
mod config;
mod constants;
mod errors;
mod model;
mod storage;
mod store;
mod watch;

pub mod metrics;
pub mod utils;

pub use client::*;
pub use config::*;
pub use errors::*;
pub use model::*;
pub use storage::*;
pub use store::*;
pub use watch::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
