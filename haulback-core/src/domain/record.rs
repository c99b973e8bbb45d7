//! Order line record - the unit of export output

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// One purchased line item, flattened out of its order.
///
/// A record only exists once every required field parsed; there are no
/// placeholder values. Field declaration order is the export column
/// order for both sinks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub product_name: String,
    pub product_quantity: u32,
    /// Serialized as a JSON number, not a string.
    #[serde(with = "rust_decimal::serde::float")]
    pub product_price: Decimal,
    pub product_url: Option<String>,
    pub product_image_url: Option<String>,
}
