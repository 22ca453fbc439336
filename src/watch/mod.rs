//! One-shot watch mechanism for monitoring key changes
//!
//! A watcher is an opaque id (typically a client `ip:port`) registered against
//! a key. The next committed `set` on that key takes the whole watcher set out
//! of the registry and notifies every captured watcher exactly once. Watchers
//! wanting further changes must register again, usually by reading the key
//! with `should_watch` set.
//!
//! ```text
//! register(key, w) ──► WatchRegistry (DashMap<key, HashSet<watcher>>)
//!                              │
//! set(key, v) ... commit ──► drain(key)   [atomic take-and-clear]
//!                              │
//!                              ▼
//!                     Notifier::notify(w, key, Change)   (once per watcher)
//! ```
//!
//! Delivery is pluggable through [`Notifier`]. [`LogNotifier`] only records the
//! event; [`ChannelNotifier`] pushes it into a `crossbeam-channel` queue that
//! never blocks the write path.

mod notifier;
mod registry;


pub use notifier::*;
pub use registry::*;
