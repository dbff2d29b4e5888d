#![forbid(unsafe_code)]
//! tsops-planner: YAML pipelines -> resolved, validated `Vec<StageSpec>`.
//!
//! - `dsl::yaml` parses the document into loosely-specified `Step`s
//!   (sequence keys may be omitted).
//! - `rules::resolve` fills defaults from the `EngineConfig` and rejects
//!   steps the operator registry would refuse.
//! - `rules::optimize` drops stages that cannot change the stream.

pub mod dsl;
pub mod rules;

use thiserror::Error;
use tsops_core::config::EngineConfig;
use tsops_core::dag::StageSpec;

pub use dsl::yaml::{parse_yaml_pipeline, ParsedPipeline, Step};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid pipeline: {0}")]
    Invalid(String),
}

/// Parse, resolve against `base` (overlaid with the document's `config:`),
/// validate and optimize in one go.
pub fn plan_pipeline(
    yaml_src: &str,
    base: &EngineConfig,
) -> Result<(Vec<StageSpec>, EngineConfig), PlanError> {
    let parsed = parse_yaml_pipeline(yaml_src)?;
    let cfg = base.clone().merged(&parsed.config);
    let specs = rules::resolve(&parsed.steps, &cfg)?;
    Ok((rules::optimize(specs), cfg))
}
