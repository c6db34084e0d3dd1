//! Shared replay types: [`StepKind`], [`Step`] and [`Trace`].
//!
//! A trace is the complete, ordered record of one algorithm run. Each step
//! captures a single atomic operation together with a full value copy of the
//! state a renderer needs at that instant, so steps can be replayed in any
//! order without touching live algorithm state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Tag identifying the atomic operation a [`Step`] records.
///
/// The serialized form uses kebab-case (`edge-accept`, `rotate-left`, ...),
/// which is the vocabulary renderers key their styling off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Two values or nodes were compared.
    Compare,
    /// Two array slots were exchanged.
    Swap,
    /// A vertex or node became part of the visited set.
    Visit,
    /// An element entered a queue.
    Enqueue,
    /// An element left a queue.
    Dequeue,
    /// A dequeue was attempted on an empty queue.
    Underflow,
    /// An edge is being examined for acceptance.
    ExamineEdge,
    /// The examined edge joined the spanning tree.
    EdgeAccept,
    /// The examined edge was rejected (it would close a cycle).
    EdgeReject,
    /// The dequeued edge was discarded because both endpoints are in the tree.
    EdgeSkip,
    /// The spanning tree is complete while unexamined edges remain.
    EarlyTermination,
    /// The unvisited vertex with minimum tentative distance was chosen.
    Select,
    /// A relaxation improved a neighbor's tentative distance.
    Update,
    /// A settled vertex improved none of its neighbors.
    NoUpdate,
    /// The search target was reached; the snapshot carries the path.
    TargetReached,
    /// A new key was attached to the tree.
    Insert,
    /// The key to insert is already present; the structure is unchanged.
    AlreadyExists,
    /// A key was removed from the tree.
    Delete,
    /// The requested key is absent.
    NotFound,
    /// Left rotation around the named pivot.
    RotateLeft,
    /// Right rotation around the named pivot.
    RotateRight,
    /// The search descended into a left child.
    GoLeft,
    /// The search descended into a right child.
    GoRight,
    /// The search key was located.
    Found,
    /// Query and node ranges are disjoint; the node contributes nothing.
    OverlapNone,
    /// The node range lies entirely inside the query range.
    OverlapComplete,
    /// The ranges overlap partially; both children are consulted.
    OverlapPartial,
    /// Two child contributions were summed.
    Combine,
    /// A missing trie child was created.
    CreateNode,
    /// The trie child for this character already existed.
    NodeExists,
    /// The terminal trie node was flagged end-of-word.
    MarkEnd,
    /// The word was already present; the trie is unchanged.
    WordExists,
    /// Generation finished without satisfying the goal (e.g. disconnected graph).
    Incomplete,
    /// Generation finished normally; the snapshot carries the final result.
    Complete,
}

/// One immutable, fully self-contained snapshot of algorithm state at a
/// single atomic operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step<S> {
    /// Position in the trace, 0-based, assigned at generation time.
    pub index: usize,
    /// The atomic operation this step records.
    pub kind: StepKind,
    /// Full value copy of everything a renderer needs at this instant.
    ///
    /// Snapshots never alias live working state; mutating the generator's
    /// working copies after a step is recorded cannot change it.
    pub snapshot: S,
    /// Human-readable description of what happened, for "current step" display.
    pub narrative: String,
}

/// The complete ordered step sequence for one problem instance.
///
/// Immutable once generated. Cloning is cheap (the steps are behind an
/// [`Arc`]), so handing a trace to a playback controller and keeping one for
/// inspection costs nothing, and swapping in a regenerated trace is a single
/// value replacement rather than an in-place mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<S> {
    steps: Arc<[Step<S>]>,
}

impl<S> Trace<S> {
    /// Number of steps in the trace.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true for a trace with no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Step<S>> {
        self.steps.get(index)
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step<S>] {
        &self.steps
    }

    /// The final step, if the trace is non-empty.
    pub fn last(&self) -> Option<&Step<S>> {
        self.steps.last()
    }

    /// Kind of the final step.
    ///
    /// Generators end every trace with a distinct terminal step
    /// ([`StepKind::Complete`], [`StepKind::Incomplete`],
    /// [`StepKind::TargetReached`], [`StepKind::Found`] or
    /// [`StepKind::NotFound`]), so this is how callers distinguish success
    /// from structural infeasibility without scanning the sequence.
    pub fn outcome(&self) -> Option<StepKind> {
        self.last().map(|s| s.kind)
    }

    /// Iterate the steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Step<S>> {
        self.steps.iter()
    }
}

impl<S> From<Vec<Step<S>>> for Trace<S> {
    fn from(steps: Vec<Step<S>>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

impl<S: Serialize> Serialize for Trace<S> {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        self.steps.as_ref().serialize(serializer)
    }
}

impl<'de, S: Deserialize<'de>> Deserialize<'de> for Trace<S> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<Step<S>>::deserialize(deserializer)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(index: usize, kind: StepKind) -> Step<u32> {
        Step {
            index,
            kind,
            snapshot: index as u32,
            narrative: format!("step {index}"),
        }
    }

    #[test]
    fn kinds_serialize_kebab_case() {
        let json = serde_json::to_string(&StepKind::EdgeAccept).unwrap();
        assert_eq!(json, "\"edge-accept\"");
        let json = serde_json::to_string(&StepKind::RotateLeft).unwrap();
        assert_eq!(json, "\"rotate-left\"");
        let back: StepKind = serde_json::from_str("\"overlap-partial\"").unwrap();
        assert_eq!(back, StepKind::OverlapPartial);
    }

    #[test]
    fn outcome_is_last_kind() {
        let trace: Trace<u32> = vec![
            step(0, StepKind::Compare),
            step(1, StepKind::Swap),
            step(2, StepKind::Complete),
        ]
        .into();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.outcome(), Some(StepKind::Complete));
        assert_eq!(trace.get(1).unwrap().kind, StepKind::Swap);
    }

    #[test]
    fn empty_trace() {
        let trace: Trace<u32> = Vec::new().into();
        assert!(trace.is_empty());
        assert_eq!(trace.outcome(), None);
        assert!(trace.get(0).is_none());
    }

    #[test]
    fn trace_serializes_as_step_sequence() {
        let trace: Trace<u32> = vec![step(0, StepKind::Complete)].into();
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json[0]["kind"], "complete");
        assert_eq!(json[0]["index"], 0);
        let back: Trace<u32> = serde_json::from_value(json).unwrap();
        assert_eq!(back, trace);
    }
}
