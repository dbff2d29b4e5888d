#![forbid(unsafe_code)]
//! tsops-operators: one-record-in, one-record-out stages.
//!
//! Design intent:
//! - Every stage is synchronous and owns its state privately; records must be
//!   delivered in order, one stage instance per stream.
//! - Parameters are validated at construction (`OpError`); `apply` never fails.
//! - Numeric checks go through `tsops_core::numeric` only.

pub mod aggregate;
pub mod codec;
pub mod diff;
pub mod map;
pub mod ops;
pub mod project;
pub mod registry;
pub mod traits;
pub mod window;

mod trace;

pub use registry::Registry;
pub use traits::{OpError, Operator, OperatorExt, Streamed};
