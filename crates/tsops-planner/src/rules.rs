//! Default resolution, validation and simple rewrites.

use tsops_core::config::EngineConfig;
use tsops_core::dag::StageSpec;
use tsops_core::path::Path;

use crate::dsl::yaml::Step;
use crate::PlanError;

/// Turn written steps into fully-specified stages, rejecting anything the
/// operator registry would refuse.
pub fn resolve(steps: &[Step], cfg: &EngineConfig) -> Result<Vec<StageSpec>, PlanError> {
    steps
        .iter()
        .enumerate()
        .map(|(idx, step)| resolve_step(idx, step, cfg))
        .collect()
}

fn resolve_step(idx: usize, step: &Step, cfg: &EngineConfig) -> Result<StageSpec, PlanError> {
    let invalid = |msg: String| PlanError::Invalid(format!("step {idx} ({}): {msg}", step.op()));
    let key = |k: &Option<String>| -> Result<String, PlanError> {
        match k.as_ref().or(cfg.default_key.as_ref()) {
            Some(k) if !k.is_empty() => Ok(k.clone()),
            Some(_) => Err(invalid("sequence key is empty".into())),
            None => Err(invalid("no sequence key and no default_key".into())),
        }
    };

    Ok(match step {
        Step::Elapsed { key: k } => StageSpec::Elapsed { key: key(k)? },
        Step::Dt { key: k } => StageSpec::Dt { key: key(k)? },
        Step::Cumsum { key: k } => StageSpec::Cumsum { key: key(k)? },
        Step::Sma { key: k, n } => {
            if *n == 0 {
                return Err(invalid("window size must be at least 1".into()));
            }
            if *n > cfg.max_window {
                return Err(invalid(format!(
                    "window size {n} exceeds max_window {}",
                    cfg.max_window
                )));
            }
            StageSpec::Sma { key: key(k)?, n: *n }
        }
        Step::Into {
            key: k,
            path,
            name,
        } => {
            Path::parse(path).map_err(|e| invalid(format!("path {path:?}: {e}")))?;
            StageSpec::Into {
                key: key(k)?,
                path: path.clone(),
                name: name.clone(),
            }
        }
        Step::Flatten => StageSpec::Flatten,
        Step::Nest => StageSpec::Nest,
        Step::Slide { key: k, offset } => {
            if !offset.is_finite() {
                return Err(invalid("offset must be finite".into()));
            }
            StageSpec::Slide {
                key: key(k)?,
                offset: *offset,
            }
        }
    })
}

/// Apply lightweight rewrites that never change the output stream.
///
/// Currently: collapse runs of `flatten` (and of `nest`); both are idempotent.
pub fn optimize(stages: Vec<StageSpec>) -> Vec<StageSpec> {
    let mut out: Vec<StageSpec> = Vec::with_capacity(stages.len());
    for stage in stages {
        let repeat = matches!(
            (out.last(), &stage),
            (Some(StageSpec::Flatten), StageSpec::Flatten) | (Some(StageSpec::Nest), StageSpec::Nest)
        );
        if !repeat {
            out.push(stage);
        }
    }
    out
}
