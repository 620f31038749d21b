//! Route handlers. Each returns an HTML fragment (or JSON for state export).

pub mod atlas;
pub mod util;
