use tsops_core::numeric::coerce;
use tsops_core::{Record, Value};

use crate::traits::Operator;

/// Replaces every numeric field (except `key`) with its change since the
/// previous record.
///
/// - first record: numeric fields become `null`;
/// - field absent or `null` in the previous record: value passes through;
/// - previous value present but not numeric: `null`;
/// - non-numeric fields and `key` are copied unchanged.
///
/// The baseline kept for the next record is the raw input, not the output.
#[derive(Debug, Clone)]
pub struct Dt {
    key: String,
    prev: Option<Record>,
}

impl Dt {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prev: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Operator for Dt {
    fn name(&self) -> &'static str {
        "dt"
    }

    fn apply(&mut self, record: Record) -> Record {
        let mut out = record.clone();
        for (k, v) in out.iter_mut() {
            if k == self.key {
                continue;
            }
            let Some(current) = coerce(v) else {
                continue;
            };
            match self.prev.as_ref().map(|p| p.get(k)) {
                None => *v = Value::Null,
                Some(None) | Some(Some(Value::Null)) => {}
                Some(Some(previous)) => {
                    *v = coerce(previous).map_or(Value::Null, |p| Value::Number(current - p));
                }
            }
        }
        self.prev = Some(record);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::OperatorExt;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> Record {
        Record::from_json(v).unwrap()
    }

    #[test]
    fn first_record_nulls_numeric_fields_only() {
        let out = Dt::new("v").apply(rec(json!({"v": 0, "foo": 0, "bar": "hi", "s": "2"})));
        assert_eq!(
            out,
            rec(json!({"v": 0, "foo": null, "bar": "hi", "s": null}))
        );
    }

    #[test]
    fn new_field_passes_through_absolute_value() {
        let out = Dt::new("v").apply_batch(vec![
            rec(json!({"v": 0, "a": 1})),
            rec(json!({"v": 1, "a": 3, "b": 10})),
            rec(json!({"v": 2, "a": 4, "b": 15})),
        ]);
        assert_eq!(out[1], rec(json!({"v": 1, "a": 2, "b": 10})));
        assert_eq!(out[2], rec(json!({"v": 2, "a": 1, "b": 5})));
    }

    #[test]
    fn baseline_is_raw_input() {
        let mut dt = Dt::new("v");
        dt.apply(rec(json!({"v": 0, "a": 10})));
        dt.apply(rec(json!({"v": 1, "a": 15})));
        // diffed against raw 15, not the emitted 5
        let out = dt.apply(rec(json!({"v": 2, "a": 16})));
        assert_eq!(out.get("a"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn null_or_text_baseline() {
        let out = Dt::new("v").apply_batch(vec![
            rec(json!({"v": 0, "a": null, "b": "x"})),
            rec(json!({"v": 1, "a": 4, "b": 5})),
        ]);
        assert_eq!(out[1], rec(json!({"v": 1, "a": 4, "b": null})));
    }
}
