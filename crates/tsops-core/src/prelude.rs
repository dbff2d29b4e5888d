//! Convenient re-exports for downstream crates.

pub use crate::codec::{flatten, nest, seek};
pub use crate::config::{EngineConfig, PipelineOverrides};
pub use crate::dag::StageSpec;
pub use crate::error::{Error, Result};
pub use crate::manifest::{ManifestId, RunManifest, StageCounts};
pub use crate::numeric::{coerce, is_numeric};
pub use crate::path::{Path, PathError, Step};
pub use crate::value::{Record, Value};
