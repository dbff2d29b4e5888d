//! Numeric predicate and coercion shared by every operator.
//!
//! A value is numeric when it is a finite number, or a string that (ignoring
//! surrounding whitespace) parses as a finite number. Null, booleans, arrays,
//! records and non-numeric strings are not numeric and bypass arithmetic.

use crate::value::Value;

/// Coerce `value` to `f64` if it is numeric.
pub fn coerce(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => *n,
        Value::Str(s) => parse_numeric_str(s)?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

pub fn is_numeric(value: &Value) -> bool {
    coerce(value).is_some()
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    // Rust accepts spelled-out specials ("inf", "nan"); those are caught by
    // the finiteness check in `coerce`.
    trimmed.parse::<f64>().ok()
}
