//! Field parsers for the storefront's locale-formatted text
//!
//! The order payload carries dates as `DD/MM/YY` inside a phrase,
//! quantities as `X<n>` markers, and prices as comma-decimal amounts
//! with a trailing currency symbol. Each parser isolates one of those
//! conventions, is pure, and signals "unparsable" as `None` rather
//! than an error - a field that does not parse drops the affected
//! record, never the run.

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

/// Extract a calendar date from text containing a `DD/MM/YY` pattern.
///
/// The 2-digit year is expanded by prefixing the current century.
/// Returns `None` when no pattern is found or the date is impossible
/// (month 13, day 32).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let re = Regex::new(r"(\d{2})/(\d{2})/(\d{2})").unwrap();
    let caps = re.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = 2000 + caps[3].parse::<i32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Extract a positive quantity from text like `X3 unit(s)`.
///
/// Returns `None` when no digit run follows the marker, or when the
/// quantity is zero.
pub fn parse_quantity(text: &str) -> Option<u32> {
    let re = Regex::new(r"X(\d+)").unwrap();
    let caps = re.captures(text)?;
    let quantity: u32 = caps[1].parse().ok()?;
    if quantity == 0 {
        return None;
    }
    Some(quantity)
}

/// Parse a price like `1.234,56 €` into a decimal.
///
/// Strips the currency symbol, removes the `.` thousands separators,
/// converts the `,` decimal separator, then parses. Returns `None` on
/// any conversion failure or a negative result.
pub fn parse_price(text: &str) -> Option<Decimal> {
    let cleaned = text.replace('€', "").replace('.', "").replace(',', ".");
    let price: Decimal = cleaned.trim().parse().ok()?;
    if price < Decimal::ZERO {
        return None;
    }
    Some(price)
}
