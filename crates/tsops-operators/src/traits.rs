//! Operator trait + streaming adaptor.
//!
//! A stage turns exactly one input record into exactly one output record.
//! Stages are chained by feeding one stage's outputs into the next (see
//! `tsops-exec::Pipeline`), or driven directly with `OperatorExt::stream`.

use thiserror::Error;
use tsops_core::path::PathError;
use tsops_core::Record;

#[derive(Debug, Error)]
pub enum OpError {
    #[error("planning error: {0}")]
    Plan(String),

    #[error("invalid path: {0}")]
    Path(#[from] PathError),
}

/// Trait that all stages implement.
///
/// Invariants:
/// - `apply` is called once per record, in arrival order.
/// - The output for record *i* depends only on the stage parameters and the
///   records 0..=i seen by this instance.
/// - Implementations never reach back into a record they already returned.
pub trait Operator: Send {
    /// Human-readable stage name (stable).
    fn name(&self) -> &'static str;

    /// Transform one record.
    fn apply(&mut self, record: Record) -> Record;
}

impl<O: Operator + ?Sized> Operator for Box<O> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn apply(&mut self, record: Record) -> Record {
        (**self).apply(record)
    }
}

pub trait OperatorExt: Operator + Sized {
    /// Lazily apply this stage to every record of `input`.
    fn stream<I>(self, input: I) -> Streamed<Self, I::IntoIter>
    where
        I: IntoIterator<Item = Record>,
    {
        Streamed {
            op: self,
            input: input.into_iter(),
        }
    }

    /// Eagerly apply this stage to a batch, keeping state for later calls.
    fn apply_batch<I>(&mut self, input: I) -> Vec<Record>
    where
        I: IntoIterator<Item = Record>,
    {
        input.into_iter().map(|r| self.apply(r)).collect()
    }
}

impl<O: Operator> OperatorExt for O {}

/// Iterator returned by `OperatorExt::stream`.
pub struct Streamed<O, I> {
    op: O,
    input: I,
}

impl<O, I> Streamed<O, I> {
    /// Give back the stage with whatever state it accumulated.
    pub fn into_inner(self) -> O {
        self.op
    }
}

impl<O, I> Iterator for Streamed<O, I>
where
    O: Operator,
    I: Iterator<Item = Record>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let record = self.input.next()?;
        Some(self.op.apply(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.input.size_hint()
    }
}
