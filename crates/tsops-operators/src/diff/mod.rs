//! Differencing stages: each output is compared against the previous input.
//!
//! - `Elapsed`: delta of the sequence key, written to a new field.
//! - `Dt`: delta of every numeric field except the sequence key.
//!
//! Both emit `null` where the first record has no baseline.

mod dt;
mod elapsed;

pub use dt::Dt;
pub use elapsed::Elapsed;

use tsops_core::numeric::coerce;
use tsops_core::Value;

/// `current - previous` when both are numeric, `Null` otherwise.
pub(crate) fn difference(current: Option<&Value>, previous: Option<&Value>) -> Value {
    match (current.and_then(coerce), previous.and_then(coerce)) {
        (Some(c), Some(p)) => Value::Number(c - p),
        _ => Value::Null,
    }
}
