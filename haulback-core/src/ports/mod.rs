//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The walker
//! depends only on these traits, not on concrete implementations.

mod order_source;

pub use order_source::{MonthFetch, OrderSource, RawLineItem, RawOrder};
