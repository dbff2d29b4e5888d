use tsops_core::numeric::coerce;
use tsops_core::{Record, Value};

use crate::trace;
use crate::traits::{OpError, Operator};
use crate::window::RingBuffer;

/// Simple moving average over the last `n` records.
///
/// The window holds raw records. For every field other than `key` found in
/// the window, the output carries the mean of that field's numeric values;
/// fields without a numeric value in the window are omitted. `key` is the
/// current record's value, never averaged.
#[derive(Debug, Clone)]
pub struct Sma {
    key: String,
    window: RingBuffer<Record>,
}

impl Sma {
    pub fn new(key: impl Into<String>, n: usize) -> Result<Self, OpError> {
        if n == 0 {
            return Err(OpError::Plan("sma window must hold at least one record".into()));
        }
        Ok(Self {
            key: key.into(),
            window: RingBuffer::new(n),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Number of records currently backing the mean: `min(seen, n)`.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}

impl Operator for Sma {
    fn name(&self) -> &'static str {
        "sma"
    }

    fn apply(&mut self, record: Record) -> Record {
        let seq = record.get(&self.key).cloned();
        if self.window.push(record).is_some() {
            trace::window_evicted("sma", self.window.capacity());
        }

        let columns = pivot(self.window.iter());
        let mut out = Record::with_capacity(columns.len());
        if let Some(seq) = seq {
            out.insert(self.key.clone(), seq);
        }
        for (field, values) in columns {
            if field == self.key {
                continue;
            }
            if let Some(avg) = mean(&values) {
                out.insert(field, Value::Number(avg));
            }
        }
        out
    }
}

/// Transpose records into (field, values) columns, fields in first-seen order.
fn pivot<'a>(records: impl Iterator<Item = &'a Record>) -> Vec<(&'a str, Vec<&'a Value>)> {
    let mut columns: Vec<(&'a str, Vec<&'a Value>)> = Vec::new();
    for record in records {
        for (k, v) in record.iter() {
            match columns.iter_mut().find(|(name, _)| *name == k) {
                Some((_, values)) => values.push(v),
                None => columns.push((k, vec![v])),
            }
        }
    }
    columns
}

/// Mean of the numeric entries; `None` when there are none or the result
/// is not finite.
fn mean(values: &[&Value]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .filter_map(|v| coerce(v))
        .fold((0.0, 0usize), |(s, c), n| (s + n, c + 1));
    if count == 0 {
        return None;
    }
    let avg = sum / count as f64;
    avg.is_finite().then_some(avg)
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
    fn zero_window_is_rejected() {
        assert!(matches!(Sma::new("v", 0), Err(OpError::Plan(_))));
    }

    #[test]
    fn window_grows_then_slides() {
        let mut sma = Sma::new("v", 2).unwrap();
        let out = sma.apply_batch(vec![
            rec(json!({"v": 0, "a": 2})),
            rec(json!({"v": 1, "a": 4})),
            rec(json!({"v": 2, "a": 8})),
        ]);
        assert_eq!(out[0], rec(json!({"v": 0, "a": 2})));
        assert_eq!(out[1], rec(json!({"v": 1, "a": 3})));
        assert_eq!(out[2], rec(json!({"v": 2, "a": 6})));
        assert_eq!(sma.window_len(), 2);
    }

    #[test]
    fn text_fields_are_dropped_and_gaps_skipped() {
        let out = Sma::new("v", 3).unwrap().apply_batch(vec![
            rec(json!({"v": 0, "a": 1, "label": "x"})),
            rec(json!({"v": 1, "label": "y"})),
            rec(json!({"v": 2, "a": "5"})),
        ]);
        assert_eq!(out[0], rec(json!({"v": 0, "a": 1})));
        assert_eq!(out[1], rec(json!({"v": 1, "a": 1})));
        // mean over the numeric entries only: (1 + 5) / 2
        assert_eq!(out[2], rec(json!({"v": 2, "a": 3})));
    }

    #[test]
    fn field_leaves_output_when_evicted() {
        let out = Sma::new("v", 1).unwrap().apply_batch(vec![
            rec(json!({"v": 0, "a": 1})),
            rec(json!({"v": 1, "b": 2})),
        ]);
        assert_eq!(out[1], rec(json!({"v": 1, "b": 2})));
    }
}
