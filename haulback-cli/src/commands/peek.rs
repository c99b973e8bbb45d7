//! Peek command - fetch one month and show it without exporting

use std::path::PathBuf;

use anyhow::Result;

use haulback_core::{
    flatten_orders, MonthFetch, NullProgress, OrderSource, Period, Progress, StorefrontClient,
};

use super::{load_config, load_session};
use crate::output;

/// Surfaces per-item warnings directly; peek has no summary to fold
/// them into.
struct WarnProgress;

impl Progress for WarnProgress {
    fn warn(&mut self, msg: &str) {
        output::warning(&format!("Warning: {}", msg));
    }
}

pub fn run(
    period: &str,
    config: Option<PathBuf>,
    session: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let period: Period = period.parse()?;
    let config = load_config(config)?;
    let session = load_session(session)?;
    let client = StorefrontClient::new(&session, config.page_size, config.fetch_timeout_secs)?;

    match client.fetch_month(period) {
        MonthFetch::Orders(orders) => {
            let (records, _) = if json {
                flatten_orders(&orders, &mut NullProgress)
            } else {
                flatten_orders(&orders, &mut WarnProgress)
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Order", "Date", "Product", "Qty", "Price"]);
            for record in &records {
                table.add_row(vec![
                    record.order_id.clone(),
                    record.order_date.to_string(),
                    record.product_name.clone(),
                    record.product_quantity.to_string(),
                    record.product_price.to_string(),
                ]);
            }
            println!("{}", table);
            output::success(&format!(
                "{} line items in {} orders for {}",
                records.len(),
                orders.len(),
                period
            ));
        }
        MonthFetch::Empty => {
            if json {
                println!("[]");
            } else {
                output::info(&format!("No orders in {}.", period));
            }
        }
        MonthFetch::Malformed { reason, excerpt } => {
            anyhow::bail!("Malformed response for {}: {}\n{}", period, reason, excerpt);
        }
        MonthFetch::Transport { error } => {
            anyhow::bail!("Fetch failed for {}: {}", period, error);
        }
    }

    Ok(())
}
