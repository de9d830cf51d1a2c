use serde_json::Value;
use std::io;

use super::{batch_row_fields, is_batch, BATCH_HEADERS};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if is_batch(value) {
        if let Value::Array(rows) = value {
            let _ = wtr.write_record(BATCH_HEADERS);
            for row in rows {
                let _ = wtr.write_record(batch_row_fields(row));
            }
        }
        let _ = wtr.flush();
        return;
    }

    match value {
        Value::Object(map) => {
            // Two-column CSV (field, value) over the result envelope when
            // present, otherwise the object itself
            let fields = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in fields {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                let _ = wtr.write_record([&format_csv_value(item)]);
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
