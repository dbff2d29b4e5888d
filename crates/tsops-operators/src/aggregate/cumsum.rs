use tsops_core::numeric::coerce;
use tsops_core::{Record, Value};

use crate::traits::Operator;

/// Running total per numeric field.
///
/// Each output is a snapshot of the accumulator: every field seen as numeric
/// so far with its total, plus the current record's `key`. A field that was
/// never numeric never appears, even if it was present.
#[derive(Debug, Clone)]
pub struct Cumsum {
    key: String,
    acc: Record,
}

impl Cumsum {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            acc: Record::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current totals, including the last sequence key.
    pub fn totals(&self) -> &Record {
        &self.acc
    }
}

impl Operator for Cumsum {
    fn name(&self) -> &'static str {
        "cumsum"
    }

    fn apply(&mut self, record: Record) -> Record {
        if !record.contains_key(&self.key) {
            self.acc.remove(&self.key);
        }
        for (k, v) in record {
            if k == self.key {
                self.acc.insert(k, v);
                continue;
            }
            let Some(n) = coerce(&v) else {
                continue;
            };
            if let Some(Value::Number(total)) = self.acc.get_mut(&k) {
                *total += n;
            } else {
                self.acc.insert(k, Value::Number(n));
            }
        }
        self.acc.clone()
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
    fn totals_accumulate_and_key_is_latest() {
        let out = Cumsum::new("v").apply_batch(vec![
            rec(json!({"v": 0, "foo": 1, "bar": "hi"})),
            rec(json!({"v": 1, "foo": 2})),
            rec(json!({"v": 5, "foo": "3"})),
        ]);
        assert_eq!(out[0], rec(json!({"v": 0, "foo": 1})));
        assert_eq!(out[1], rec(json!({"v": 1, "foo": 3})));
        assert_eq!(out[2], rec(json!({"v": 5, "foo": 6})));
    }

    #[test]
    fn field_appears_once_numeric_and_stays() {
        let out = Cumsum::new("v").apply_batch(vec![
            rec(json!({"v": 0, "a": "n/a"})),
            rec(json!({"v": 1, "a": 4})),
            rec(json!({"v": 2})),
            rec(json!({"v": 3, "a": 1})),
        ]);
        assert_eq!(out[0], rec(json!({"v": 0})));
        assert_eq!(out[1], rec(json!({"v": 1, "a": 4})));
        assert_eq!(out[2], rec(json!({"v": 2, "a": 4})));
        assert_eq!(out[3], rec(json!({"v": 3, "a": 5})));
    }

    #[test]
    fn missing_key_is_not_carried_over() {
        let out = Cumsum::new("v").apply_batch(vec![
            rec(json!({"v": 0, "a": 1})),
            rec(json!({"a": 1})),
        ]);
        assert_eq!(out[1], rec(json!({"a": 2})));
    }
}
