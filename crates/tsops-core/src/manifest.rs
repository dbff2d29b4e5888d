//! Run manifest for audit/replay.
//!
//! The engine emits one manifest per run. Feeding the same records through a
//! pipeline with the same `plan_hash` reproduces the same `outputs_digest`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hash::Hash256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestId(pub Uuid);

/// Record counts observed at one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    pub stage: String,
    pub records_in: u64,
    pub records_out: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub id: ManifestId,

    /// Stable hash of the stage list (and stage params) used.
    pub plan_hash: Hash256,

    /// Engine version string for provenance.
    pub engine_version: String,

    /// Digest over every emitted record, in order.
    pub outputs_digest: Option<Hash256>,

    pub stages: Vec<StageCounts>,

    /// Milliseconds since Unix epoch (UTC).
    pub started_ms: u64,
    pub finished_ms: u64,
}

impl RunManifest {
    pub fn new(plan_hash: Hash256, started_ms: u64) -> Self {
        Self {
            id: ManifestId(Uuid::new_v4()),
            plan_hash,
            engine_version: crate::VERSION.to_string(),
            outputs_digest: None,
            stages: Vec::new(),
            started_ms,
            finished_ms: started_ms,
        }
    }

    pub fn finish(
        mut self,
        finished_ms: u64,
        stages: Vec<StageCounts>,
        outputs_digest: Option<Hash256>,
    ) -> Self {
        self.finished_ms = finished_ms;
        self.stages = stages;
        self.outputs_digest = outputs_digest;
        self
    }
}
