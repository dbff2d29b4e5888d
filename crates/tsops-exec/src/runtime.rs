//! Runtime: build a pipeline from stage specs, drive records through it and
//! emit a `RunManifest`.

use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use tsops_core::config::EngineConfig;
use tsops_core::dag::StageSpec;
use tsops_core::hash::{hash_serde, RecordDigest};
use tsops_core::manifest::RunManifest;
use tsops_core::Record;
use tsops_operators::{OpError, Registry};
use tsops_planner::{plan_pipeline, PlanError};

use crate::metrics::emit_span;
use crate::pipeline::Pipeline;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("operator: {0}")]
    Operator(#[from] OpError),
    #[error("plan: {0}")]
    Plan(#[from] PlanError),
    #[error("core: {0}")]
    Core(#[from] tsops_core::Error),
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub records: Vec<Record>,
    pub manifest: RunManifest,
}

/// Engine owns the configuration and the operator registry.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    cfg: EngineConfig,
    registry: Registry,
}

impl Engine {
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            cfg,
            registry: Registry::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.cfg
    }

    /// Fresh, independent stage instances for `specs`.
    pub fn build(&self, specs: &[StageSpec]) -> Result<Pipeline, ExecError> {
        let mut pipeline = Pipeline::new().trace_records(self.cfg.trace_records);
        for op in self.registry.instantiate_all(specs, &self.cfg)? {
            pipeline.push_stage(op);
        }
        Ok(pipeline)
    }

    /// Run `input` through a new pipeline built from `specs`.
    pub fn run<I>(&self, specs: &[StageSpec], input: I) -> Result<RunOutput, ExecError>
    where
        I: IntoIterator<Item = Record>,
    {
        let plan_hash = hash_serde(&specs)?;
        let manifest = RunManifest::new(plan_hash, now_millis());
        let mut pipeline = self.build(specs)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(plan = %plan_hash, stages = specs.len(), "run started");

        let mut digest = RecordDigest::new();
        let mut records = Vec::new();
        for out in pipeline.run(input) {
            digest.update(&out)?;
            records.push(out);
        }

        let manifest = manifest.finish(now_millis(), pipeline.counts(), Some(digest.finish()));
        emit_span(
            "run_finished",
            &[
                ("plan_hash", manifest.plan_hash.to_hex()),
                ("records", digest.count().to_string()),
                ("stages", pipeline.len().to_string()),
            ],
        );
        Ok(RunOutput { records, manifest })
    }

    /// Plan a YAML pipeline (its `config:` block overlays this engine's
    /// config for the run) and execute it.
    pub fn run_yaml<I>(&self, yaml_src: &str, input: I) -> Result<RunOutput, ExecError>
    where
        I: IntoIterator<Item = Record>,
    {
        let (specs, cfg) = plan_pipeline(yaml_src, &self.cfg)?;
        Engine::new(cfg).run(&specs, input)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
