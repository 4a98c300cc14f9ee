//! Numeric coercion for stored counter values

use serde_json::Value;

/// Coerce a stored counter value to a non-negative count.
///
/// Numbers are taken as-is, strings are trimmed and parsed, booleans count as
/// 1 or 0. Anything else, including NaN, infinities and negative values,
/// becomes 0. Fractions truncate and out-of-range values saturate.
pub fn coerce_count(value: &Value) -> u64 {
    let number = match value {
        Value::Number(n) => {
            if let Some(count) = n.as_u64() {
                return count;
            }
            n.as_f64().unwrap_or(0.0)
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };

    if number.is_finite() && number > 0.0 {
        number as u64
    } else {
        0
    }
}
