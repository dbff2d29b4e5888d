//! Codec stages: whole-record flatten and nest.

use tsops_core::codec;
use tsops_core::Record;

use crate::traits::Operator;

/// Replaces each record with its flattened form (`a.b[0]` style keys).
#[derive(Debug, Clone, Copy, Default)]
pub struct Flatten;

impl Operator for Flatten {
    fn name(&self) -> &'static str {
        "flatten"
    }

    fn apply(&mut self, record: Record) -> Record {
        codec::flatten(&record)
    }
}

/// Inverse of `Flatten`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nest;

impl Operator for Nest {
    fn name(&self) -> &'static str {
        "nest"
    }

    fn apply(&mut self, record: Record) -> Record {
        codec::nest(&record)
    }
}
