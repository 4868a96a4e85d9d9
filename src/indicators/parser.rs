//! Numeric parsing for exchange payloads and snapshot readings.
//!
//! Two policies coexist: strict parsing (`parse_f64`, `parse_field`) reports a
//! value as invalid or unavailable, while `parse_numeric_or_zero` and `or_zero`
//! silently fall back to `0.0` for generic comparisons.

use crate::indicators::error::IndicatorError;
use serde_json::Value;

pub fn parse_f64(value: &str) -> Result<f64, IndicatorError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IndicatorError::InvalidNumericFormat(value.to_string()))
}

pub fn parse_i64(value: &str) -> Result<i64, IndicatorError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| IndicatorError::InvalidNumericFormat(value.to_string()))
}

/// Parse a JSON field that may carry a number or a string-encoded number.
pub fn parse_field(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_f64(s).ok(),
        _ => None,
    }
}

/// Lenient coercion: anything that does not parse becomes `0.0`.
pub fn parse_numeric_or_zero(value: &str) -> f64 {
    parse_f64(value).unwrap_or(0.0)
}

/// Read a snapshot value for comparison, treating "unavailable" as `0.0`.
pub fn or_zero(reading: Option<f64>) -> f64 {
    reading.filter(|v| v.is_finite()).unwrap_or(0.0)
}
