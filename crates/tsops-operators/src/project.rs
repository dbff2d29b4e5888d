//! `into`: single-level projection of one sub-path.
//!
//! Resolves `path` against the record and re-keys what it finds under
//! `name`, one level deep:
//! - array  -> `name[i]` for each element
//! - record -> `name.k` for each key
//! - scalar -> `name`
//! - null or unresolved -> nothing
//!
//! The output carries the sequence key and nothing else from the input.

use tsops_core::codec::seek;
use tsops_core::path::Path;
use tsops_core::{Record, Value};

use crate::traits::{OpError, Operator};

#[derive(Debug, Clone)]
pub struct IntoProjection {
    key: String,
    path: Path,
    name: String,
}

impl IntoProjection {
    /// `name` defaults to the path text.
    pub fn new(key: impl Into<String>, path: &str, name: Option<&str>) -> Result<Self, OpError> {
        let parsed = Path::parse(path)?;
        let name = name.unwrap_or(path).to_string();
        Ok(Self {
            key: key.into(),
            path: parsed,
            name,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Operator for IntoProjection {
    fn name(&self) -> &'static str {
        "into"
    }

    fn apply(&mut self, record: Record) -> Record {
        let mut out = Record::new();
        match seek(&record, &self.path) {
            Some(Value::Array(items)) => {
                for (i, v) in items.iter().enumerate() {
                    out.insert(format!("{}[{}]", self.name, i), v.clone());
                }
            }
            Some(Value::Record(fields)) => {
                for (k, v) in fields.iter() {
                    out.insert(format!("{}.{}", self.name, k), v.clone());
                }
            }
            Some(Value::Null) | None => {}
            Some(scalar) => {
                out.insert(self.name.clone(), scalar.clone());
            }
        }
        if let Some(seq) = record.get(&self.key) {
            out.insert(self.key.clone(), seq.clone());
        }
        out
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
    fn array_target_is_spread_one_level() {
        let mut op = IntoProjection::new("v", "abc.def", None).unwrap();
        let out = op.apply(rec(json!({"v": 0, "abc": {"def": ["x", ["y", "z"]]}, "other": 1})));
        assert_eq!(
            out,
            rec(json!({"v": 0, "abc.def[0]": "x", "abc.def[1]": ["y", "z"]}))
        );
    }

    #[test]
    fn record_target_and_rename() {
        let mut op = IntoProjection::new("v", "abc", Some("bar")).unwrap();
        let out = op.apply(rec(json!({"v": 3, "abc": {"def": [1, 2], "g": 5}})));
        assert_eq!(out, rec(json!({"v": 3, "bar.def": [1, 2], "bar.g": 5})));
    }

    #[test]
    fn scalar_null_and_missing() {
        let mut op = IntoProjection::new("v", "zyx[1]", Some("foo")).unwrap();
        assert_eq!(
            op.apply(rec(json!({"v": 0, "zyx": ["aa", "ab"]}))),
            rec(json!({"v": 0, "foo": "ab"}))
        );
        assert_eq!(
            op.apply(rec(json!({"v": 1, "zyx": ["aa", null]}))),
            rec(json!({"v": 1}))
        );
        assert_eq!(op.apply(rec(json!({"v": 6}))), rec(json!({"v": 6})));
        assert_eq!(op.apply(rec(json!({"zyx": [0, 1]}))), rec(json!({"foo": 1})));
    }

    #[test]
    fn malformed_path_is_rejected() {
        assert!(matches!(
            IntoProjection::new("v", "a..b", None),
            Err(OpError::Path(_))
        ));
    }
}
