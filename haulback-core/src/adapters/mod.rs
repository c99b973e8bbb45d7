//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Storefront HTTP client for OrderSource (blocking reqwest over the
//!   externally supplied session channel)

pub mod storefront;

#[cfg(test)]
pub mod storefront_mock;
