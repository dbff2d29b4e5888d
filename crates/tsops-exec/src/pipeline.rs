//! Ordered chain of stages.

use tsops_core::manifest::StageCounts;
use tsops_core::Record;
use tsops_operators::Operator;

use crate::metrics::{self, StageMetrics};

/// A linear chain of stages; each record passes through every stage in
/// order before the next record enters.
///
/// A `Pipeline` is itself an `Operator`, so pipelines nest.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Operator>>,
    metrics: Vec<StageMetrics>,
    trace_records: bool,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a trace event for every record leaving every stage.
    pub fn trace_records(mut self, on: bool) -> Self {
        self.trace_records = on;
        self
    }

    /// Builder-style append.
    pub fn then(mut self, op: impl Operator + 'static) -> Self {
        self.push_stage(Box::new(op));
        self
    }

    pub fn push_stage(&mut self, op: Box<dyn Operator>) {
        self.metrics.push(StageMetrics::new(op.name()));
        self.stages.push(op);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn metrics(&self) -> &[StageMetrics] {
        &self.metrics
    }

    pub fn counts(&self) -> Vec<StageCounts> {
        self.metrics.iter().map(StageMetrics::counts).collect()
    }

    /// Push one record through every stage.
    pub fn push(&mut self, record: Record) -> Record {
        let mut record = record;
        for (pos, (stage, m)) in self.stages.iter_mut().zip(self.metrics.iter_mut()).enumerate() {
            record = stage.apply(record);
            m.observe(&record);
            if self.trace_records {
                metrics::trace_record(stage.name(), pos, &record);
            }
        }
        record
    }

    /// Lazily push every record of `input`; state carries across calls.
    pub fn run<'a, I>(&'a mut self, input: I) -> impl Iterator<Item = Record> + 'a
    where
        I: IntoIterator<Item = Record>,
        I::IntoIter: 'a,
    {
        input.into_iter().map(move |r| self.push(r))
    }
}

impl Operator for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn apply(&mut self, record: Record) -> Record {
        self.push(record)
    }
}
