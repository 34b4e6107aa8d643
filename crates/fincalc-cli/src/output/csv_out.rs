use serde_json::Value;
use std::io;

use super::plain;

/// Write output as CSV to stdout: `field,value` pairs for a single
/// record, one row per element for a list.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let written = match value {
        Value::Object(map) => {
            let record = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            write_pairs(&mut wtr, record)
        }
        Value::Array(rows) => write_rows(&mut wtr, rows),
        _ => wtr.write_record([plain(value)]),
    };

    if let Err(e) = written.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV output error: {}", e);
    }
}

fn write_pairs<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    record: &serde_json::Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in record {
        wtr.write_record([key.as_str(), plain(val).as_str()])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            wtr.write_record([plain(row)])?;
        }
        return Ok(());
    };

    let headers: Vec<&String> = first.keys().collect();
    wtr.write_record(&headers)?;
    for row in rows.iter().filter_map(Value::as_object) {
        wtr.write_record(headers.iter().map(|h| row.get(*h).map(plain).unwrap_or_default()))?;
    }
    Ok(())
}
