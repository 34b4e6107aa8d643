use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use fincalc_core::currency::CurrencyCode;

use super::{display_field, plain};

/// Render a computation envelope, a list of records or a flat object.
pub fn print_table(value: &Value, currency: CurrencyCode) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_envelope(result, map, currency),
            _ => print_fields(map, currency),
        },
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", plain(value)),
    }
}

fn print_envelope(
    result: &Map<String, Value>,
    envelope: &Map<String, Value>,
    currency: CurrencyCode,
) {
    print_fields(result, currency);

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_fields(map: &Map<String, Value>, currency: CurrencyCode) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), display_field(key, val, currency)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            println!("{}", plain(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(plain).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}
