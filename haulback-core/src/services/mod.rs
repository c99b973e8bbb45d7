//! Service layer - business logic orchestration
//!
//! The walker drives the month cursor, the order source, and the field
//! parsers; the exporter turns the accumulated records into files.

mod export;
mod walker;

pub use export::{ExportReport, ExportService, SinkReport};
pub use walker::{
    flatten_orders, FlattenStats, HistoryWalker, NullProgress, Progress, StopReason, WalkReport,
};
