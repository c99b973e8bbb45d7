//! Order source port
//!
//! Defines the interface for fetching one month of order history, and
//! the classified payload the walker consumes. Keeping the
//! classification in a tagged type makes the walker's branching
//! exhaustive and lets tests inject canned months without a socket.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::domain::Period;

/// One month of order history, already classified.
#[derive(Debug, Clone)]
pub enum MonthFetch {
    /// The month contains at least one order.
    Orders(Vec<RawOrder>),
    /// The storefront explicitly reported zero orders for the month.
    Empty,
    /// The response did not decode, or decoded to an unrecognized
    /// shape. `excerpt` carries the start of the raw body for
    /// diagnostics.
    Malformed { reason: String, excerpt: String },
    /// Network failure, timeout, or non-success HTTP status.
    Transport { error: String },
}

/// One order as it arrives from the storefront, before flattening.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOrder {
    /// Order identifier (the API returns number or string, we accept both).
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub incr_id: Option<String>,
    /// Locale-formatted creation date phrase.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub items: Vec<RawLineItem>,
}

/// One line item inside a raw order. Everything is optional text; the
/// walker decides what survives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLineItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

/// Deserialize an optional ID that can be number or string
fn deserialize_optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Number(n)) => Ok(Some(n.to_string())),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(JsonValue::Null) | None => Ok(None),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Order source trait
///
/// Implementations fetch one month of order history over an already
/// authenticated channel. All failure modes are folded into the
/// returned [`MonthFetch`]; the call itself never fails.
pub trait OrderSource {
    /// Source name (e.g., "storefront")
    fn name(&self) -> &str;

    /// Fetch the order history page for one period.
    fn fetch_month(&self, period: Period) -> MonthFetch;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_order_accepts_numeric_id() {
        let order: RawOrder = serde_json::from_str(r#"{"incr_id": 7401223}"#).unwrap();
        assert_eq!(order.incr_id.as_deref(), Some("7401223"));
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_raw_order_accepts_string_id() {
        let order: RawOrder = serde_json::from_str(r#"{"incr_id": "100234"}"#).unwrap();
        assert_eq!(order.incr_id.as_deref(), Some("100234"));
    }

    #[test]
    fn test_raw_order_tolerates_missing_fields() {
        let order: RawOrder = serde_json::from_str("{}").unwrap();
        assert!(order.incr_id.is_none());
        assert!(order.created_at.is_none());
        assert!(order.items.is_empty());
    }
}
