//! Game module: Atlas rules, session state and persistence.
//!
//! State lives in WASM memory (thread_local) for the lifetime of the Web
//! Worker and is mirrored to the page's localStorage as a JSON snapshot.

pub mod board;
pub mod config;
pub mod entry;
pub mod error;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod store;
