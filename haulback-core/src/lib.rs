//! Haulback core - walk a storefront order history and export it
//!
//! This crate implements the history-walk engine following hexagonal
//! architecture:
//!
//! - **domain**: core entities (Period, OrderLineRecord, error types)
//! - **parse**: tolerant parsers for the storefront's locale-formatted fields
//! - **ports**: the OrderSource trait the walker drives
//! - **adapters**: the real HTTP storefront client
//! - **services**: the history walker and the dual-format exporter

pub mod adapters;
pub mod config;
pub mod domain;
pub mod parse;
pub mod ports;
pub mod services;

// Re-export commonly used types at crate root
pub use adapters::storefront::StorefrontClient;
pub use config::{RunConfig, SessionChannel};
pub use domain::result::{Error, Result};
pub use domain::{OrderLineRecord, Period};
pub use ports::{MonthFetch, OrderSource, RawLineItem, RawOrder};
pub use services::{
    flatten_orders, ExportReport, ExportService, FlattenStats, HistoryWalker, NullProgress,
    Progress, SinkReport, StopReason, WalkReport,
};
