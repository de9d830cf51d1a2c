use serde_json::Value;
use std::io::{self, Read};

/// Read piped JSON from stdin.
///
/// Returns None when stdin is a terminal or the pipe carries nothing but
/// whitespace, so callers fall back to flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(raw)?))
}
