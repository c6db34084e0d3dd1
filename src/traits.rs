//! Core trait definitions for trace generation.
//!
//! To add an algorithm to the engine, implement [`TraceGenerator`] for a
//! struct that captures the problem instance (the array to sort, the graph
//! and start vertex, the operation script, ...).
//!
//! The contract:
//! - The instance is immutable; generation works on private copies.
//! - `validate` runs first and rejects invalid references (unknown vertices,
//!   out-of-bounds ranges, negative weights) so no partial trace is ever
//!   produced.
//! - `record` then emits the *complete* ordered step sequence eagerly,
//!   exactly one step per atomic operation, ending with a distinct terminal
//!   step.

use crate::error::TraceError;
use crate::step::{Step, StepKind, Trace};

/// An algorithm that can replay itself as an ordered step sequence.
///
/// Implementations describe one problem *family* (MST, shortest path,
/// self-balancing tree, ...) applied to one concrete instance. The engine
/// drives the two-phase sequence: [`validate`](Self::validate), then
/// [`record`](Self::record) into a [`Recorder`].
pub trait TraceGenerator {
    /// Full rendering state at one instant.
    ///
    /// Must be an owned value copy: cloning a snapshot and mutating the
    /// generator's working state afterwards must not change it.
    type Snapshot: Clone + PartialEq;

    /// Human-readable algorithm name, used in narratives and logs.
    fn name(&self) -> &'static str;

    /// Check instance preconditions before any step is emitted.
    ///
    /// Structural infeasibility discovered *during* the run (a disconnected
    /// graph, a missing key) is not a validation concern; those finish the
    /// trace with a distinct terminal step instead.
    fn validate(&self) -> Result<(), TraceError>;

    /// Eagerly emit the full ordered step sequence.
    ///
    /// Called at most once per engine run, only after `validate` succeeded.
    /// Infallible on purpose: every condition that could abort generation
    /// has already been rejected, and everything else (cycles, duplicates,
    /// underflows) is a step, not an error.
    fn record(&self, rec: &mut Recorder<Self::Snapshot>);
}

/// Append-only sink for steps during generation.
///
/// Assigns indices in emission order, which makes the resulting [`Trace`]
/// total and ordered by construction: no step can be skipped, duplicated or
/// reordered after the fact.
pub struct Recorder<S> {
    steps: Vec<Step<S>>,
}

impl<S: Clone + PartialEq> Recorder<S> {
    pub(crate) fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record one atomic operation.
    ///
    /// `snapshot` is taken by value; the caller hands over a fresh copy of
    /// its working state, never a shared reference into it.
    pub fn push(&mut self, kind: StepKind, snapshot: S, narrative: impl Into<String>) {
        let index = self.steps.len();
        self.steps.push(Step {
            index,
            kind,
            snapshot,
            narrative: narrative.into(),
        });
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true while no step has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn finish(self) -> Trace<S> {
        self.steps.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_emission_order() {
        let mut rec: Recorder<u8> = Recorder::new();
        rec.push(StepKind::Compare, 1, "first");
        rec.push(StepKind::Swap, 2, "second");
        rec.push(StepKind::Complete, 3, "done");
        let trace = rec.finish();
        let indices: Vec<usize> = trace.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(trace.get(2).unwrap().narrative, "done");
    }

    #[test]
    fn snapshots_are_value_copies() {
        let mut rec: Recorder<Vec<i64>> = Recorder::new();
        let mut working = vec![3, 1, 2];
        rec.push(StepKind::Compare, working.clone(), "before swap");
        working.swap(0, 1);
        rec.push(StepKind::Swap, working.clone(), "after swap");
        let trace = rec.finish();
        assert_eq!(trace.get(0).unwrap().snapshot, vec![3, 1, 2]);
        assert_eq!(trace.get(1).unwrap().snapshot, vec![1, 3, 2]);
    }
}
