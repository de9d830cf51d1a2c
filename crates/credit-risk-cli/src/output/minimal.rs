use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Batch results print one `ticker: decision-or-error` line each; single
/// results look for well-known fields in order of priority, then fall back
/// to the first field in the result object.
pub fn print_minimal(value: &Value) {
    if let Value::Array(rows) = value {
        for row in rows {
            let ticker = row.get("ticker").and_then(Value::as_str).unwrap_or("?");
            let outcome = row
                .get("report")
                .and_then(|r| r.get("decision"))
                .or_else(|| row.get("error"))
                .map(format_minimal)
                .unwrap_or_else(|| "?".to_string());
            println!("{}: {}", ticker, outcome);
        }
        return;
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "decision",
        "z_score",
        "default_probability",
        "annualized_volatility",
        "call_value",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
