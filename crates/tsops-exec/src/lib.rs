#![forbid(unsafe_code)]
//! tsops-exec: pipeline composition, run metrics and manifests.
//!
//! Records flow through a `Pipeline` strictly in order, one stage after the
//! other, on the caller's thread. There is no buffering and no flush at end
//! of stream: the last output is emitted with the last input.

pub mod metrics;
pub mod pipeline;
pub mod runtime;

pub use pipeline::Pipeline;
pub use runtime::{Engine, ExecError, RunOutput};
