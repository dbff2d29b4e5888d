//! Minimal YAML -> steps parser for *linear* pipelines.
//!
//! Example:
//! ```yaml
//! config: { default_key: "t", max_window: 100 }
//! steps:
//!   - op: flatten
//!   - op: dt
//!   - op: sma
//!     n: 3
//!   - op: into
//!     key: t
//!     path: abc.def
//!     name: bar
//! ```

use serde::{Deserialize, Serialize};
use tsops_core::config::PipelineOverrides;

use crate::PlanError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub config: Option<PipelineOverrides>,
    pub steps: Vec<Step>,
}

/// One step as written; `key` falls back to `config.default_key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "op")]
pub enum Step {
    Elapsed {
        #[serde(default)]
        key: Option<String>,
    },
    Dt {
        #[serde(default)]
        key: Option<String>,
    },
    Cumsum {
        #[serde(default)]
        key: Option<String>,
    },
    Sma {
        #[serde(default)]
        key: Option<String>,
        n: usize,
    },
    Into {
        #[serde(default)]
        key: Option<String>,
        path: String,
        #[serde(default)]
        name: Option<String>,
    },
    Flatten,
    Nest,
    Slide {
        #[serde(default)]
        key: Option<String>,
        offset: f64,
    },
}

impl Step {
    pub fn op(&self) -> &'static str {
        match self {
            Step::Elapsed { .. } => "elapsed",
            Step::Dt { .. } => "dt",
            Step::Cumsum { .. } => "cumsum",
            Step::Sma { .. } => "sma",
            Step::Into { .. } => "into",
            Step::Flatten => "flatten",
            Step::Nest => "nest",
            Step::Slide { .. } => "slide",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedPipeline {
    pub steps: Vec<Step>,
    pub config: PipelineOverrides,
}

/// Parse YAML into steps plus per-pipeline config overrides.
pub fn parse_yaml_pipeline(yaml_src: &str) -> Result<ParsedPipeline, PlanError> {
    let doc: Pipeline = serde_yaml::from_str(yaml_src)?;
    if doc.steps.is_empty() {
        return Err(PlanError::Invalid("empty pipeline".into()));
    }
    Ok(ParsedPipeline {
        steps: doc.steps,
        config: doc.config.unwrap_or_default(),
    })
}
