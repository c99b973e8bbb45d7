//! Integration tests for the dual-format exporter

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use haulback_core::{ExportService, OrderLineRecord};

fn sample_records() -> Vec<OrderLineRecord> {
    vec![
        OrderLineRecord {
            order_id: "100234".to_string(),
            order_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            product_name: "Whey 2kg".to_string(),
            product_quantity: 1,
            product_price: Decimal::new(2990, 2),
            product_url: Some("https://shop.example.com/whey-2kg".to_string()),
            product_image_url: None,
        },
        OrderLineRecord {
            order_id: "100198".to_string(),
            order_date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            product_name: "Creatine 500g".to_string(),
            product_quantity: 2,
            product_price: Decimal::new(1250, 2),
            product_url: None,
            product_image_url: Some("https://shop.example.com/img/creatine.jpg".to_string()),
        },
    ]
}

#[test]
fn test_json_sink_preserves_fields_and_numeric_types() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("orders.json");
    let csv_path = dir.path().join("orders.csv");
    let exporter = ExportService::new(json_path.clone(), csv_path);

    let report = exporter.export(&sample_records());
    assert!(report.sinks.iter().all(|sink| sink.ok()));

    let body = std::fs::read_to_string(&json_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
    let array = parsed.as_array().unwrap();
    assert_eq!(array.len(), 2);

    let first = &array[0];
    assert_eq!(first["order_id"], "100234");
    assert_eq!(first["order_date"], "2025-03-15");
    assert_eq!(first["product_quantity"], 1);
    assert!(first["product_price"].is_f64(), "price must be a number");
    assert!((first["product_price"].as_f64().unwrap() - 29.90).abs() < 1e-9);
    assert!(first["product_image_url"].is_null());

    // Human-readable: pretty-printed, one field per line.
    assert!(body.contains("\n  "));
}

#[test]
fn test_csv_sink_writes_header_and_rows_in_discovery_order() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("orders.json");
    let csv_path = dir.path().join("orders.csv");
    let exporter = ExportService::new(json_path, csv_path.clone());

    exporter.export(&sample_records());

    let body = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "order_id,order_date,product_name,product_quantity,product_price,product_url,product_image_url"
    );
    let first_row = lines.next().unwrap();
    assert!(first_row.starts_with("100234,2025-03-15,Whey 2kg,1,"));
    let second_row = lines.next().unwrap();
    assert!(second_row.starts_with("100198,"));
    assert!(lines.next().is_none());
}

#[test]
fn test_empty_accumulation_writes_no_files() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("orders.json");
    let csv_path = dir.path().join("orders.csv");
    let exporter = ExportService::new(json_path.clone(), csv_path.clone());

    let report = exporter.export(&[]);

    assert!(report.nothing_found());
    assert!(report.sinks.is_empty());
    assert!(!json_path.exists());
    assert!(!csv_path.exists());
}

#[test]
fn test_sinks_fail_independently() {
    let dir = TempDir::new().unwrap();
    // The JSON sink points into a directory that does not exist; the
    // CSV sink must still be written.
    let json_path = dir.path().join("missing").join("orders.json");
    let csv_path = dir.path().join("orders.csv");
    let exporter = ExportService::new(json_path, csv_path.clone());

    let report = exporter.export(&sample_records());

    assert_eq!(report.sinks.len(), 2);
    assert!(report.sinks[0].error.is_some());
    assert!(report.sinks[1].ok());
    assert!(csv_path.exists());
}
