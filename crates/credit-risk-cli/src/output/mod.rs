pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten one batch row into the summary columns shared by the table and
/// CSV formatters: ticker, status, z_score, tier, default_probability,
/// decision, error. Failed rows carry the error message and blank scores.
pub(crate) fn batch_row_fields(row: &Value) -> Vec<String> {
    let get = |path: &[&str]| -> String {
        let mut cur = row;
        for key in path {
            match cur.get(key) {
                Some(v) => cur = v,
                None => return String::new(),
            }
        }
        match cur {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    };

    vec![
        get(&["ticker"]),
        get(&["status"]),
        get(&["report", "zscore", "z_score"]),
        get(&["report", "zscore", "tier"]),
        get(&["report", "structural", "default_probability"]),
        get(&["report", "decision"]),
        get(&["error"]),
    ]
}

pub(crate) const BATCH_HEADERS: [&str; 7] = [
    "ticker",
    "status",
    "z_score",
    "tier",
    "default_probability",
    "decision",
    "error",
];

/// True when the value looks like a batch result: an array of ticker rows.
pub(crate) fn is_batch(value: &Value) -> bool {
    match value {
        Value::Array(rows) => rows
            .first()
            .map(|r| r.get("ticker").is_some() && r.get("status").is_some())
            .unwrap_or(false),
        _ => false,
    }
}
