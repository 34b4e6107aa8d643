mod csv_out;
mod minimal;
mod table;

use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::currency::{format_currency, CurrencyCode};

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, currency: CurrencyCode) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Yaml => match serde_yaml::to_string(value) {
            Ok(s) => print!("{}", s),
            Err(e) => eprintln!("YAML serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value, currency),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Plain text for a scalar; nested values fall back to compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

/// Table text for one result field. Decimal strings are money, except
/// for `*_pct` fields which are percentages.
fn display_field(key: &str, value: &Value, currency: CurrencyCode) -> String {
    match value {
        Value::String(s) if key.ends_with("_pct") => format!("{}%", s),
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(amount) => format_currency(amount, currency),
            Err(_) => s.clone(),
        },
        _ => plain(value),
    }
}
