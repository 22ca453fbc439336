//! The data store: master map, replica maps, per-key locks and watches.
//!
//! ```text
//! set(k, v) ─► write lock(k) ─► WAL.append ─► master.put ─► fan-out ─► drain(k) ─► notify
//! get(k)    ─► read  lock(k) ─► random replica.get ─► [register watcher]
//! ```
//!
//! Each key owns one read/write lock, so operations on different keys never
//! contend, except at the log, which every `set` goes through.

mod builder;
mod data_node;
mod data_store;
mod lock_manager;
mod read_policy;
mod replicator;


pub use builder::*;
pub use data_node::*;
pub use data_store::*;
pub use lock_manager::*;
pub use read_policy::*;
