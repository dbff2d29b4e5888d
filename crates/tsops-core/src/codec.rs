//! Path codec: flatten nested records to single-level path keys, nest them
//! back, and seek a single location.
//!
//! Round-trip: `nest(&flatten(r)) == r` for any record whose arrays are
//! contiguous from index 0 and whose keys contain none of `.`, `[`, `]`.

use crate::path::{Path, Step};
use crate::value::{Record, Value};

/// Recursively flatten `record` into one field per scalar leaf.
///
/// Leaf values are copied verbatim (no coercion). Empty arrays and empty
/// records are leaves too, so they survive a round trip.
pub fn flatten(record: &Record) -> Record {
    let mut out = Record::with_capacity(record.len());
    for (k, v) in record.iter() {
        let mut path = Path::key(k);
        flatten_into(&mut out, &mut path, v);
    }
    out
}

fn flatten_into(out: &mut Record, path: &mut Path, value: &Value) {
    match value {
        Value::Record(r) if !r.is_empty() => {
            for (k, v) in r.iter() {
                path.push_key(k);
                flatten_into(out, path, v);
                path.pop();
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, v) in items.iter().enumerate() {
                path.push_index(i);
                flatten_into(out, path, v);
                path.pop();
            }
        }
        leaf => {
            out.insert(path.to_string(), leaf.clone());
        }
    }
}

/// Rebuild nested structure from path-keyed fields.
///
/// Keys that are not valid paths are kept verbatim at top level, and so are
/// keys with an array index above `max(field count, MIN_INDEX_LIMIT)`.
/// Missing array slots are filled with `Null`; when two keys disagree about
/// the shape at a location, the later key wins.
pub fn nest(flat: &Record) -> Record {
    let limit = flat.len().max(MIN_INDEX_LIMIT);
    let mut out = Record::with_capacity(flat.len());
    for (k, v) in flat.iter() {
        match Path::parse(k) {
            Ok(path) if indices_within(&path, limit) => {
                assign(&mut out, path.steps(), v.clone())
            }
            _ => {
                out.insert(k, v.clone());
            }
        }
    }
    out
}

/// Smallest index bound `nest` accepts regardless of record width.
pub const MIN_INDEX_LIMIT: usize = 256;

fn indices_within(path: &Path, limit: usize) -> bool {
    path.steps()
        .iter()
        .all(|s| !matches!(s, Step::Index(i) if *i > limit))
}

/// Write `value` at `steps` under `root`, creating intermediate containers.
pub fn assign(root: &mut Record, steps: &[Step], value: Value) {
    match steps.split_first() {
        Some((Step::Key(k), rest)) => place(root.slot(k), rest, value),
        // A path never starts with an index; nothing sensible to attach it to.
        Some((Step::Index(_), _)) | None => {}
    }
}

fn place(slot: &mut Value, rest: &[Step], value: Value) {
    let Some((step, tail)) = rest.split_first() else {
        *slot = value;
        return;
    };
    match step {
        Step::Key(k) => {
            if !matches!(slot, Value::Record(_)) {
                *slot = Value::Record(Record::new());
            }
            if let Value::Record(r) = slot {
                place(r.slot(k), tail, value);
            }
        }
        Step::Index(i) => {
            if !matches!(slot, Value::Array(_)) {
                *slot = Value::Array(Vec::new());
            }
            let Some(len) = i.checked_add(1) else {
                return;
            };
            if let Value::Array(items) = slot {
                if items.len() < len {
                    items.resize(len, Value::Null);
                }
                place(&mut items[*i], tail, value);
            }
        }
    }
}

/// Resolve `path` against `record`. Returns `None` when any step is missing
/// or lands on the wrong kind of container.
pub fn seek<'a>(record: &'a Record, path: &Path) -> Option<&'a Value> {
    let (first, rest) = path.steps().split_first()?;
    let mut cur = match first {
        Step::Key(k) => record.get(k)?,
        Step::Index(_) => return None,
    };
    for step in rest {
        cur = match (step, cur) {
            (Step::Key(k), Value::Record(r)) => r.get(k)?,
            (Step::Index(i), Value::Array(items)) => items.get(*i)?,
            _ => return None,
        };
    }
    Some(cur)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> Record {
        Record::from_json(v).expect("object")
    }

    #[test]
    fn flatten_emits_one_field_per_leaf() {
        let r = rec(json!({"v": 0, "abc": {"def": ["v0", "v0.1"]}, "zyx": ["aa", "ab"]}));
        let flat = flatten(&r);
        assert_eq!(
            flat,
            rec(json!({
                "v": 0,
                "abc.def[0]": "v0",
                "abc.def[1]": "v0.1",
                "zyx[0]": "aa",
                "zyx[1]": "ab"
            }))
        );
        assert_eq!(
            flat.keys().collect::<Vec<_>>(),
            vec!["v", "abc.def[0]", "abc.def[1]", "zyx[0]", "zyx[1]"]
        );
    }

    #[test]
    fn flatten_keeps_nulls_and_empty_containers() {
        let r = rec(json!({"a": null, "b": {}, "c": [], "d": {"e": [null, {}]}}));
        let flat = flatten(&r);
        assert_eq!(
            flat,
            rec(json!({"a": null, "b": {}, "c": [], "d.e[0]": null, "d.e[1]": {}}))
        );
        assert_eq!(nest(&flat), r);
    }

    #[test]
    fn nest_builds_arrays_and_objects() {
        let flat = rec(json!({"a.b[1].c": 1, "a.b[0].c": 0, "x[0][1]": "y"}));
        assert_eq!(
            nest(&flat),
            rec(json!({"a": {"b": [{"c": 0}, {"c": 1}]}, "x": [[null, "y"]]}))
        );
    }

    #[test]
    fn nest_keeps_unparseable_keys_verbatim() {
        let flat = rec(json!({"weird..key": 1, "ok.k": 2}));
        assert_eq!(nest(&flat), rec(json!({"weird..key": 1, "ok": {"k": 2}})));
    }

    #[test]
    fn nest_keeps_out_of_range_indices_verbatim() {
        let flat = rec(json!({
            "a[18446744073709551615]": 1,
            "b[100000000000]": 2,
            "c[3]": 3
        }));
        assert_eq!(
            nest(&flat),
            rec(json!({
                "a[18446744073709551615]": 1,
                "b[100000000000]": 2,
                "c": [null, null, null, 3]
            }))
        );
    }

    #[test]
    fn assign_ignores_index_that_cannot_grow() {
        let mut root = Record::new();
        let steps = [Step::Key("a".into()), Step::Index(usize::MAX)];
        assign(&mut root, &steps, Value::from(1));
        assert_eq!(root, rec(json!({"a": []})));
    }

    #[test]
    fn nest_later_key_wins_on_shape_conflict() {
        let flat = rec(json!({"a": 1, "a.b": 2}));
        assert_eq!(nest(&flat), rec(json!({"a": {"b": 2}})));
    }

    #[test]
    fn round_trip_law() {
        let r = rec(json!({
            "t": 12.5,
            "sensor": {"id": "s1", "axes": [1.0, -2.0, {"z": [true, false]}]},
            "tags": ["a"],
            "ok": true
        }));
        assert_eq!(nest(&flatten(&r)), r);
    }

    #[test]
    fn seek_stops_mid_structure() {
        let r = rec(json!({"abc": {"def": ["x", "y"]}, "zyx": ["aa", "ab"]}));
        let def = seek(&r, &Path::parse("abc.def").unwrap());
        assert_eq!(def, Some(&Value::Array(vec!["x".into(), "y".into()])));
        assert_eq!(
            seek(&r, &Path::parse("zyx[1]").unwrap()),
            Some(&Value::from("ab"))
        );
        assert_eq!(seek(&r, &Path::parse("zyx[5]").unwrap()), None);
        assert_eq!(seek(&r, &Path::parse("abc[0]").unwrap()), None);
        assert_eq!(seek(&r, &Path::parse("nope.x").unwrap()), None);
    }
}
