//! Per-stage counters and tracing hooks.
//!
//! This module purposefully avoids pulling heavy telemetry stacks. With the
//! `tracing` feature, hooks become `tracing` events; without it they are no-ops.

use serde::{Deserialize, Serialize};
use tsops_core::manifest::StageCounts;
use tsops_core::Record;

/// Counters for one stage of a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageMetrics {
    pub stage: String,
    pub records_in: u64,
    pub records_out: u64,
    /// Sum of output field counts; shows how wide a stage's records run.
    pub fields_out: u64,
}

impl StageMetrics {
    pub fn new(stage: &str) -> Self {
        Self {
            stage: stage.to_string(),
            ..Self::default()
        }
    }

    pub fn observe(&mut self, output: &Record) {
        self.records_in += 1;
        self.records_out += 1;
        self.fields_out += output.len() as u64;
    }

    pub fn counts(&self) -> StageCounts {
        StageCounts {
            stage: self.stage.clone(),
            records_in: self.records_in,
            records_out: self.records_out,
        }
    }
}

#[cfg(feature = "tracing")]
pub fn emit_span(event: &str, key_values: &[(&str, String)]) {
    let span = tracing::debug_span!("tsops", event);
    let _enter = span.enter();
    for (k, v) in key_values {
        tracing::debug!(%k, %v, "metric");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit_span(_event: &str, _key_values: &[(&str, String)]) { /* no-op */
}

#[cfg(feature = "tracing")]
pub fn trace_record(stage: &str, position: usize, record: &Record) {
    tracing::trace!(
        target: "tsops::records",
        stage,
        position,
        fields = record.len(),
        "record"
    );
}

#[cfg(not(feature = "tracing"))]
pub fn trace_record(_stage: &str, _position: usize, _record: &Record) {}
