//! Client-side handle for watchers.
mod subscriber;


pub use subscriber::*;
