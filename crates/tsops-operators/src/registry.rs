//! Instantiate live stages from `StageSpec`s.

use tsops_core::config::EngineConfig;
use tsops_core::dag::StageSpec;

use crate::aggregate::{Cumsum, Sma};
use crate::codec::{Flatten, Nest};
use crate::diff::{Dt, Elapsed};
use crate::map::Slide;
use crate::project::IntoProjection;
use crate::trace;
use crate::traits::{OpError, Operator};

/// Maps stage descriptions to fresh operator instances.
///
/// Every call returns a new instance with empty state, so two pipelines
/// built from the same specs never share a window or accumulator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Registry;

impl Registry {
    pub fn new() -> Self {
        Self
    }

    pub fn instantiate(
        &self,
        spec: &StageSpec,
        cfg: &EngineConfig,
    ) -> Result<Box<dyn Operator>, OpError> {
        let op: Box<dyn Operator> = match spec {
            StageSpec::Elapsed { key } => {
                Box::new(Elapsed::new(key.as_str()).with_field(cfg.elapsed_field.as_str()))
            }
            StageSpec::Dt { key } => Box::new(Dt::new(key.as_str())),
            StageSpec::Cumsum { key } => Box::new(Cumsum::new(key.as_str())),
            StageSpec::Sma { key, n } => {
                if *n > cfg.max_window {
                    return Err(OpError::Plan(format!(
                        "sma window {n} exceeds max_window {}",
                        cfg.max_window
                    )));
                }
                Box::new(Sma::new(key.as_str(), *n)?)
            }
            StageSpec::Into { key, path, name } => Box::new(IntoProjection::new(
                key.as_str(),
                path,
                name.as_deref(),
            )?),
            StageSpec::Flatten => Box::new(Flatten),
            StageSpec::Nest => Box::new(Nest),
            StageSpec::Slide { key, offset } => Box::new(Slide::new(key.as_str(), *offset)),
        };
        trace::stage_built(op.name(), spec.seq_key().unwrap_or("-"));
        Ok(op)
    }

    pub fn instantiate_all(
        &self,
        specs: &[StageSpec],
        cfg: &EngineConfig,
    ) -> Result<Vec<Box<dyn Operator>>, OpError> {
        specs.iter().map(|s| self.instantiate(s, cfg)).collect()
    }
}
