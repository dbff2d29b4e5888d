use tsops_core::{Record, Value};

use super::difference;
use crate::traits::Operator;

/// Adds `elapsed = record[key] - previous[key]`; `null` on the first record.
///
/// Every input field is forwarded unchanged.
#[derive(Debug, Clone)]
pub struct Elapsed {
    key: String,
    field: String,
    prev: Option<Record>,
}

impl Elapsed {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            field: "elapsed".to_string(),
            prev: None,
        }
    }

    /// Write the delta to `field` instead of `elapsed`.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Operator for Elapsed {
    fn name(&self) -> &'static str {
        "elapsed"
    }

    fn apply(&mut self, mut record: Record) -> Record {
        let delta = match &self.prev {
            None => Value::Null,
            Some(prev) => difference(record.get(&self.key), prev.get(&self.key)),
        };
        record.insert(self.field.clone(), delta);
        self.prev = Some(record.clone());
        record
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
    fn first_record_gets_null_then_deltas() {
        let out = Elapsed::new("v").apply_batch(vec![
            rec(json!({"v": 0, "foo": 0, "bar": "hi"})),
            rec(json!({"v": 1, "foo": -1.1})),
            rec(json!({"v": 7, "foo": 6.6})),
        ]);
        assert_eq!(out[0], rec(json!({"v": 0, "foo": 0, "bar": "hi", "elapsed": null})));
        assert_eq!(out[1], rec(json!({"v": 1, "foo": -1.1, "elapsed": 1})));
        assert_eq!(out[2], rec(json!({"v": 7, "foo": 6.6, "elapsed": 6})));
    }

    #[test]
    fn non_numeric_key_yields_null() {
        let out = Elapsed::new("t").with_field("gap").apply_batch(vec![
            rec(json!({"t": "10"})),
            rec(json!({"t": "later"})),
            rec(json!({"t": 12})),
        ]);
        assert_eq!(out[1].get("gap"), Some(&Value::Null));
        // baseline "later" is not numeric either
        assert_eq!(out[2].get("gap"), Some(&Value::Null));

        let out =
            Elapsed::new("t").apply_batch(vec![rec(json!({"t": "10"})), rec(json!({"t": 12}))]);
        assert_eq!(out[1].get("elapsed"), Some(&Value::Number(2.0)));
    }
}
