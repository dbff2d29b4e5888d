//! Stateless whole-record stages: user closures and sequence-key shifting.

use std::fmt;

use tsops_core::numeric::coerce;
use tsops_core::{Record, Value};

use crate::traits::Operator;

/// Wraps a caller-supplied `FnMut(Record) -> Record`.
pub struct MapFn<F> {
    f: F,
}

impl<F> MapFn<F>
where
    F: FnMut(Record) -> Record + Send,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for MapFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapFn").finish_non_exhaustive()
    }
}

impl<F> Operator for MapFn<F>
where
    F: FnMut(Record) -> Record + Send,
{
    fn name(&self) -> &'static str {
        "map"
    }

    fn apply(&mut self, record: Record) -> Record {
        (self.f)(record)
    }
}

/// Adds `offset` to the sequence key when it is numeric.
#[derive(Debug, Clone)]
pub struct Slide {
    key: String,
    offset: f64,
}

impl Slide {
    pub fn new(key: impl Into<String>, offset: f64) -> Self {
        Self {
            key: key.into(),
            offset,
        }
    }
}

impl Operator for Slide {
    fn name(&self) -> &'static str {
        "slide"
    }

    fn apply(&mut self, mut record: Record) -> Record {
        if let Some(slot) = record.get_mut(&self.key) {
            if let Some(n) = coerce(slot) {
                *slot = Value::Number(n + self.offset);
            }
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> Record {
        Record::from_json(v).unwrap()
    }

    #[test]
    fn slide_shifts_numeric_key_only() {
        let mut op = Slide::new("v", 10.0);
        assert_eq!(
            op.apply(rec(json!({"v": 7, "foo": 6.6}))),
            rec(json!({"v": 17, "foo": 6.6}))
        );
        assert_eq!(op.apply(rec(json!({"v": "x"}))), rec(json!({"v": "x"})));
        assert_eq!(op.apply(rec(json!({"foo": 1}))), rec(json!({"foo": 1})));
    }

    #[test]
    fn map_runs_closure_with_state() {
        let mut seen = 0;
        let mut op = MapFn::new(move |mut r: Record| {
            seen += 1;
            r.insert("n", Value::from(seen));
            r
        });
        op.apply(Record::new());
        let out = op.apply(Record::new());
        assert_eq!(out.get("n"), Some(&Value::Number(2.0)));
    }
}
