//! Run command - walk the history and write both export files

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use haulback_core::{
    ExportReport, ExportService, HistoryWalker, NullProgress, Period, Progress, StorefrontClient,
    WalkReport,
};

use super::{load_config, load_session};
use crate::output;

/// Prints one line per period plus warnings, matching the walk as it
/// happens.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn fetching(&mut self, period: Period) {
        println!("Fetching orders for {}...", period);
    }

    fn found(&mut self, _period: Period, orders: usize, items: usize) {
        println!("  -> {} orders, {} line items kept", orders, items);
    }

    fn empty(&mut self, _period: Period, streak: u32, threshold: u32) {
        println!("  no orders ({}/{} consecutive empty months)", streak, threshold);
    }

    fn warn(&mut self, msg: &str) {
        output::warning(&format!("Warning: {}", msg));
    }
}

#[derive(Serialize)]
struct SinkSummary {
    path: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct RunSummary {
    records: usize,
    periods_scanned: u32,
    orders_seen: u32,
    dropped_orders: u32,
    dropped_items: u32,
    stopped: String,
    fatal: bool,
    sinks: Vec<SinkSummary>,
}

impl RunSummary {
    fn new(report: &WalkReport, export: &ExportReport) -> Self {
        Self {
            records: report.records.len(),
            periods_scanned: report.periods_scanned,
            orders_seen: report.orders_seen,
            dropped_orders: report.dropped_orders,
            dropped_items: report.dropped_items,
            stopped: report.stop.to_string(),
            fatal: report.stop.is_fatal(),
            sinks: export
                .sinks
                .iter()
                .map(|sink| SinkSummary {
                    path: sink.path.display().to_string(),
                    ok: sink.ok(),
                    error: sink.error.clone(),
                })
                .collect(),
        }
    }
}

pub fn run(
    config: Option<PathBuf>,
    session: Option<PathBuf>,
    start: Option<String>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(start) = start {
        config.start = start.parse()?;
    }
    config.validate()?;

    let session = load_session(session)?;
    let client = StorefrontClient::new(&session, config.page_size, config.fetch_timeout_secs)?;
    let walker = HistoryWalker::new(&client, &config);

    // Under --json, stdout carries only the summary document.
    let report = if json {
        walker.run(&mut NullProgress)
    } else {
        walker.run(&mut ConsoleProgress)
    };

    let exporter = ExportService::new(config.json_path.clone(), config.csv_path.clone());
    let export = exporter.export(&report.records);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&RunSummary::new(&report, &export))?
        );
    } else {
        print_summary(&report, &export);
    }

    if report.stop.is_fatal() {
        anyhow::bail!("Run aborted: {}", report.stop);
    }
    Ok(())
}

fn print_summary(report: &WalkReport, export: &ExportReport) {
    println!();
    if report.stop.is_fatal() {
        output::error(&format!("Walk stopped early: {}", report.stop));
    } else {
        output::info(&format!("Walk finished: {}", report.stop));
    }

    let dropped = report.dropped_orders + report.dropped_items;
    if dropped > 0 {
        output::warning(&format!(
            "Dropped {} orders and {} line items with missing or unparsable fields",
            report.dropped_orders, report.dropped_items
        ));
    }

    if export.nothing_found() {
        output::warning("No line items found; no files written.");
        return;
    }

    output::success(&format!(
        "Extracted {} line items across {} months.",
        export.records, report.periods_scanned
    ));
    for sink in &export.sinks {
        match &sink.error {
            None => output::success(&format!("Wrote {}", sink.path.display())),
            Some(error) => {
                output::error(&format!("Failed to write {}: {}", sink.path.display(), error))
            }
        }
    }
}
