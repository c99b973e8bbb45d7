//! History walker - drives the month-by-month walk
//!
//! The walker is the only stateful core component besides the HTTP
//! client. It owns the per-run state (current period, empty-month
//! streak, accumulated records), flattens raw orders through the field
//! parsers, and enforces the politeness delay between fetches.

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::config::RunConfig;
use crate::domain::{OrderLineRecord, Period};
use crate::parse;
use crate::ports::{MonthFetch, OrderSource, RawOrder};

/// Progress sink for the walk. Implement this in the frontend
/// (CLI: print lines; tests: record calls).
pub trait Progress {
    fn fetching(&mut self, _period: Period) {}
    fn found(&mut self, _period: Period, _orders: usize, _items: usize) {}
    fn empty(&mut self, _period: Period, _streak: u32, _threshold: u32) {}
    fn warn(&mut self, _msg: &str) {}
}

/// A no-op progress sink you can pass when you don't care.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Why the walk ended.
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    /// Hit the configured run of consecutive months with no orders.
    EmptyStreak(u32),
    /// The next period would fall below the configured year floor.
    YearFloor(i32),
    /// Network failure, timeout, or error status while fetching.
    Transport { period: Period, error: String },
    /// Undecodable or unrecognized response payload.
    Malformed { period: Period, reason: String },
}

impl StopReason {
    /// Fatal stops end the run early; records accumulated before the
    /// stop are still exported.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Malformed { .. })
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStreak(months) => {
                write!(f, "{} consecutive months without orders", months)
            }
            Self::YearFloor(year) => write!(f, "reached the year floor ({})", year),
            Self::Transport { period, error } => {
                write!(f, "transport failure at {}: {}", period, error)
            }
            Self::Malformed { period, reason } => {
                write!(f, "malformed response at {}: {}", period, reason)
            }
        }
    }
}

/// Summary of one finished walk.
#[derive(Debug)]
pub struct WalkReport {
    /// Accumulated line items, in discovery order.
    pub records: Vec<OrderLineRecord>,
    pub periods_scanned: u32,
    pub orders_seen: u32,
    pub dropped_orders: u32,
    pub dropped_items: u32,
    pub stop: StopReason,
}

/// Counts of what the flattening pass had to drop.
#[derive(Debug, Default)]
pub struct FlattenStats {
    /// Orders skipped whole for lacking a usable id or date.
    pub dropped_orders: u32,
    /// Line items skipped for missing or unparsable required fields.
    pub dropped_items: u32,
}

/// Per-run mutable state, created at run start and dropped at run end.
struct WalkState {
    period: Period,
    empty_streak: u32,
    records: Vec<OrderLineRecord>,
}

/// History walker service
pub struct HistoryWalker<'a> {
    source: &'a dyn OrderSource,
    config: &'a RunConfig,
}

impl<'a> HistoryWalker<'a> {
    pub fn new(source: &'a dyn OrderSource, config: &'a RunConfig) -> Self {
        Self { source, config }
    }

    /// Walk backward from the configured start period until a stopping
    /// condition is met. Field-level problems are absorbed as warnings;
    /// only transport failures and malformed responses end the run
    /// early.
    pub fn run(&self, progress: &mut dyn Progress) -> WalkReport {
        let config = self.config;
        let mut state = WalkState {
            period: config.start,
            empty_streak: 0,
            records: Vec::new(),
        };
        let mut periods_scanned = 0u32;
        let mut orders_seen = 0u32;
        let mut stats = FlattenStats::default();

        let stop = loop {
            progress.fetching(state.period);
            let fetch = self.source.fetch_month(state.period);
            periods_scanned += 1;

            match fetch {
                MonthFetch::Transport { error } => {
                    break StopReason::Transport {
                        period: state.period,
                        error,
                    };
                }
                MonthFetch::Malformed { reason, .. } => {
                    break StopReason::Malformed {
                        period: state.period,
                        reason,
                    };
                }
                MonthFetch::Empty => {
                    state.empty_streak += 1;
                    progress.empty(state.period, state.empty_streak, config.empty_month_threshold);
                }
                MonthFetch::Orders(orders) => {
                    state.empty_streak = 0;
                    orders_seen += orders.len() as u32;
                    let (mut records, month_stats) = flatten_orders(&orders, progress);
                    progress.found(state.period, orders.len(), records.len());
                    state.records.append(&mut records);
                    stats.dropped_orders += month_stats.dropped_orders;
                    stats.dropped_items += month_stats.dropped_items;
                }
            }

            let next = state.period.prev();
            if next.should_stop(
                state.empty_streak,
                config.empty_month_threshold,
                config.year_floor,
            ) {
                break if state.empty_streak >= config.empty_month_threshold {
                    StopReason::EmptyStreak(state.empty_streak)
                } else {
                    StopReason::YearFloor(config.year_floor)
                };
            }
            state.period = next;

            if config.politeness_delay_secs > 0 {
                thread::sleep(Duration::from_secs(config.politeness_delay_secs));
            }
        };

        WalkReport {
            records: state.records,
            periods_scanned,
            orders_seen,
            dropped_orders: stats.dropped_orders,
            dropped_items: stats.dropped_items,
            stop,
        }
    }
}

/// Flatten raw orders into line-item records.
///
/// An order without a non-empty id and a parseable date cannot be
/// attributed and is dropped whole. Within a retained order, an item
/// is kept only when name, quantity, and price all resolve; there are
/// never records with placeholder fields.
pub fn flatten_orders(
    orders: &[RawOrder],
    progress: &mut dyn Progress,
) -> (Vec<OrderLineRecord>, FlattenStats) {
    let mut records = Vec::new();
    let mut stats = FlattenStats::default();

    for order in orders {
        let order_id = order.incr_id.as_deref().unwrap_or("").trim();
        let order_date = order.created_at.as_deref().and_then(parse::parse_date);

        let (order_id, order_date) = match (order_id, order_date) {
            (id, Some(date)) if !id.is_empty() => (id.to_string(), date),
            _ => {
                stats.dropped_orders += 1;
                progress.warn(&format!(
                    "Skipping order without usable id or date (id: {:?}, date: {:?})",
                    order.incr_id, order.created_at
                ));
                continue;
            }
        };

        for item in &order.items {
            let name = item
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty());
            let quantity = item.qty.as_deref().and_then(parse::parse_quantity);
            let price = item.price.as_deref().and_then(parse::parse_price);

            match (name, quantity, price) {
                (Some(name), Some(quantity), Some(price)) => records.push(OrderLineRecord {
                    order_id: order_id.clone(),
                    order_date,
                    product_name: name.to_string(),
                    product_quantity: quantity,
                    product_price: price,
                    product_url: item.url.clone(),
                    product_image_url: item.img.clone(),
                }),
                _ => {
                    stats.dropped_items += 1;
                    progress.warn(&format!(
                        "Skipping item in order {} with missing or unparsable fields: {}",
                        order_id,
                        item.name.as_deref().unwrap_or("<unnamed>")
                    ));
                }
            }
        }
    }

    (records, stats)
}
