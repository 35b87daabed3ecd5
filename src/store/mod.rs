//! Trade Record Store
//!
//! Client for the hosted tabular store that owns trade rows. The store is
//! the single source of truth: callers re-list after every mutation rather
//! than merging locally. Columns are snake_case on the wire while the
//! in-memory model is camelCase; `casing` is the one place that mapping
//! lives.

pub mod casing;
pub mod client;

pub use casing::{to_camel_keys, to_snake_keys};
pub use client::TradeStore;
