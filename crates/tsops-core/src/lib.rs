#![forbid(unsafe_code)]
//! tsops-core: the record model shared by every tsops crate.
//!
//! - `value`: tagged `Value` and insertion-ordered `Record`.
//! - `numeric`: the single numeric predicate/coercion all operators use.
//! - `path` + `codec`: dotted/bracketed path grammar, flatten/nest/seek.
//! - `dag`, `config`, `manifest`, `hash`: pipeline descriptions and provenance.
//!
//! No IO and no runtime live here.

pub mod codec;
pub mod config;
pub mod dag;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod numeric;
pub mod path;
pub mod prelude;
pub mod value;

pub use error::{Error, Result};
pub use value::{Record, Value};

/// Crate version, recorded in run manifests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
