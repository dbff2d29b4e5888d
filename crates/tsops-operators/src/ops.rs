//! Constructor functions, one per stage, for building pipelines in code.
//!
//! ```
//! use tsops_operators::ops;
//! use tsops_operators::OperatorExt;
//! use tsops_core::Record;
//!
//! let input = vec![Record::from_json(serde_json::json!({"t": 0, "x": 1})).unwrap()];
//! let out: Vec<Record> = ops::dt("t").stream(input).collect();
//! assert_eq!(out.len(), 1);
//! ```

use tsops_core::Record;

use crate::aggregate::{Cumsum, Sma};
use crate::codec::{Flatten, Nest};
use crate::diff::{Dt, Elapsed};
use crate::map::{MapFn, Slide};
use crate::project::IntoProjection;
use crate::traits::OpError;

pub fn elapsed(key: impl Into<String>) -> Elapsed {
    Elapsed::new(key)
}

pub fn dt(key: impl Into<String>) -> Dt {
    Dt::new(key)
}

pub fn cumsum(key: impl Into<String>) -> Cumsum {
    Cumsum::new(key)
}

pub fn sma(key: impl Into<String>, n: usize) -> Result<Sma, OpError> {
    Sma::new(key, n)
}

pub fn into(
    key: impl Into<String>,
    path: &str,
    name: Option<&str>,
) -> Result<IntoProjection, OpError> {
    IntoProjection::new(key, path, name)
}

pub fn flatten() -> Flatten {
    Flatten
}

pub fn nest() -> Nest {
    Nest
}

pub fn slide(key: impl Into<String>, offset: f64) -> Slide {
    Slide::new(key, offset)
}

pub fn map<F>(f: F) -> MapFn<F>
where
    F: FnMut(Record) -> Record + Send,
{
    MapFn::new(f)
}
