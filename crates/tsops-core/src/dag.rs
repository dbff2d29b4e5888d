//! Linear pipeline descriptions.
//!
//! The planner produces a `Vec<StageSpec>` (what to do); the operator
//! registry turns each spec into a live, stateful stage.

use serde::{Deserialize, Serialize};

/// One stage of a linear pipeline, by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "op")]
pub enum StageSpec {
    /// Delta of `key` against the previous record, written to a new field.
    Elapsed { key: String },
    /// Per-field delta against the previous record.
    Dt { key: String },
    /// Running per-field total.
    Cumsum { key: String },
    /// Sliding-window mean over the last `n` records.
    Sma { key: String, n: usize },
    /// Single-level projection of the value at `path`.
    Into {
        key: String,
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Flatten,
    Nest,
    /// Shift the sequence key by a constant.
    Slide { key: String, offset: f64 },
}

impl StageSpec {
    pub fn name(&self) -> &'static str {
        match self {
            StageSpec::Elapsed { .. } => "elapsed",
            StageSpec::Dt { .. } => "dt",
            StageSpec::Cumsum { .. } => "cumsum",
            StageSpec::Sma { .. } => "sma",
            StageSpec::Into { .. } => "into",
            StageSpec::Flatten => "flatten",
            StageSpec::Nest => "nest",
            StageSpec::Slide { .. } => "slide",
        }
    }

    /// The sequence key this stage treats specially, if any.
    pub fn seq_key(&self) -> Option<&str> {
        match self {
            StageSpec::Elapsed { key }
            | StageSpec::Dt { key }
            | StageSpec::Cumsum { key }
            | StageSpec::Sma { key, .. }
            | StageSpec::Into { key, .. }
            | StageSpec::Slide { key, .. } => Some(key),
            StageSpec::Flatten | StageSpec::Nest => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_op_tag() {
        let spec = StageSpec::Sma {
            key: "t".into(),
            n: 3,
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json, serde_json::json!({"op": "sma", "key": "t", "n": 3}));
        let back: StageSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn unit_stages_have_no_key() {
        assert_eq!(StageSpec::Flatten.seq_key(), None);
        assert_eq!(StageSpec::Nest.name(), "nest");
    }
}
