//! Lenient parsing for the count fields the store returns in wildly
//! inconsistent shapes: plain numbers, floats, booleans, or display
//! strings like "10,000+" and "1.5M".

use serde_json::Value;

/// Normalize a raw count field to an integer.
///
/// Handles numbers (floats truncate toward zero), booleans, and display
/// strings with comma separators, a trailing "+", and "k"/"m" magnitude
/// suffixes. Anything unparseable yields None; this never fails.
pub fn normalize_count(value: &Value) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_count_text(s),
        _ => None,
    }
}

fn parse_count_text(raw: &str) -> Option<i64> {
    let mut text = raw.trim().to_lowercase().replace(',', "");
    let mut multiplier = 1.0_f64;

    if let Some(stripped) = text.strip_suffix('+') {
        text = stripped.to_string();
    }
    if let Some(stripped) = text.strip_suffix('m') {
        multiplier = 1_000_000.0;
        text = stripped.to_string();
    } else if let Some(stripped) = text.strip_suffix('k') {
        multiplier = 1_000.0;
        text = stripped.to_string();
    }

    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| (v * multiplier) as i64)
}
