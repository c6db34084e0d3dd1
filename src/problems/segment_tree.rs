//! Segment-tree range-sum query as a trace generator.
//!
//! The tree is built once per instance by midpoint splitting (no steps);
//! the query then recurses with the three-way overlap test, one step per
//! visited node: `overlap-none` contributes nothing, `overlap-complete`
//! contributes the node aggregate without descending (that short-circuit is
//! the whole point of the structure), `overlap-partial` consults both
//! children and `combine`s their results. Nothing is mutated during a query.

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// Segment-tree query instance: the array and an inclusive index range.
#[derive(Debug, Clone)]
pub struct SegmentTreeQuery {
    values: Vec<i64>,
    range: (usize, usize),
}

/// One tree node; children are positions in [`SegmentTreeSnapshot::nodes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentNodeSnapshot {
    /// Inclusive array range this node aggregates.
    pub lo: usize,
    pub hi: usize,
    pub sum: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Rendering state for one query step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentTreeSnapshot {
    pub values: Vec<i64>,
    pub nodes: Vec<SegmentNodeSnapshot>,
    /// Position of the root in `nodes`.
    pub root: usize,
    /// The inclusive query range.
    pub range: (usize, usize),
    /// The node examined in this step.
    pub current: Option<usize>,
    /// `(node, amount)` contributions accepted so far.
    pub contributions: Vec<(usize, i64)>,
    /// Running total of accepted contributions.
    pub total: i64,
}

impl SegmentTreeQuery {
    pub fn new(values: Vec<i64>, range: (usize, usize)) -> Self {
        Self { values, range }
    }

    fn build(&self, lo: usize, hi: usize, nodes: &mut Vec<SegmentNodeSnapshot>) -> usize {
        let pos = nodes.len();
        nodes.push(SegmentNodeSnapshot {
            lo,
            hi,
            sum: 0,
            left: None,
            right: None,
        });
        if lo == hi {
            nodes[pos].sum = self.values[lo];
        } else {
            let mid = (lo + hi) / 2;
            let left = self.build(lo, mid, nodes);
            let right = self.build(mid + 1, hi, nodes);
            nodes[pos].left = Some(left);
            nodes[pos].right = Some(right);
            nodes[pos].sum = nodes[left].sum + nodes[right].sum;
        }
        pos
    }

    fn snapshot(
        &self,
        nodes: &[SegmentNodeSnapshot],
        current: Option<usize>,
        contributions: &[(usize, i64)],
        total: i64,
    ) -> SegmentTreeSnapshot {
        SegmentTreeSnapshot {
            values: self.values.clone(),
            nodes: nodes.to_vec(),
            root: 0,
            range: self.range,
            current,
            contributions: contributions.to_vec(),
            total,
        }
    }

    fn query(
        &self,
        nodes: &[SegmentNodeSnapshot],
        at: usize,
        rec: &mut Recorder<SegmentTreeSnapshot>,
        contributions: &mut Vec<(usize, i64)>,
        total: &mut i64,
    ) -> i64 {
        let (ql, qr) = self.range;
        let (lo, hi) = (nodes[at].lo, nodes[at].hi);
        if qr < lo || ql > hi {
            rec.push(
                StepKind::OverlapNone,
                self.snapshot(nodes, Some(at), contributions, *total),
                format!("node [{lo}, {hi}] is outside the query; contributes nothing"),
            );
            return 0;
        }
        if ql <= lo && qr >= hi {
            let sum = nodes[at].sum;
            contributions.push((at, sum));
            *total += sum;
            rec.push(
                StepKind::OverlapComplete,
                self.snapshot(nodes, Some(at), contributions, *total),
                format!("node [{lo}, {hi}] lies inside the query; contributes {sum}"),
            );
            return sum;
        }
        rec.push(
            StepKind::OverlapPartial,
            self.snapshot(nodes, Some(at), contributions, *total),
            format!("node [{lo}, {hi}] partially overlaps the query; descending into both children"),
        );
        let left = nodes[at].left.expect("partial overlap only at internal nodes");
        let right = nodes[at].right.expect("partial overlap only at internal nodes");
        let l = self.query(nodes, left, rec, contributions, total);
        let r = self.query(nodes, right, rec, contributions, total);
        rec.push(
            StepKind::Combine,
            self.snapshot(nodes, Some(at), contributions, *total),
            format!("combining child sums at [{lo}, {hi}]: {l} + {r} = {}", l + r),
        );
        l + r
    }
}

impl TraceGenerator for SegmentTreeQuery {
    type Snapshot = SegmentTreeSnapshot;

    fn name(&self) -> &'static str {
        "segment-tree-query"
    }

    fn validate(&self) -> Result<(), TraceError> {
        if self.values.is_empty() {
            return Err(TraceError::EmptyInput { what: "array" });
        }
        let (start, end) = self.range;
        if start > end || end >= self.values.len() {
            return Err(TraceError::RangeOutOfBounds {
                start,
                end,
                len: self.values.len(),
            });
        }
        Ok(())
    }

    fn record(&self, rec: &mut Recorder<SegmentTreeSnapshot>) {
        let mut nodes = Vec::new();
        self.build(0, self.values.len() - 1, &mut nodes);
        let mut contributions = Vec::new();
        let mut total = 0;
        let sum = self.query(&nodes, 0, rec, &mut contributions, &mut total);
        let (ql, qr) = self.range;
        rec.push(
            StepKind::Complete,
            self.snapshot(&nodes, None, &contributions, total),
            format!("range sum of [{ql}, {qr}] is {sum}"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceEngine;

    fn run(values: Vec<i64>, range: (usize, usize)) -> crate::Trace<SegmentTreeSnapshot> {
        TraceEngine::new(SegmentTreeQuery::new(values, range))
            .run()
            .unwrap()
    }

    fn count(trace: &crate::Trace<SegmentTreeSnapshot>, kind: StepKind) -> usize {
        trace.iter().filter(|s| s.kind == kind).count()
    }

    #[test]
    fn worked_example() {
        let trace = run(vec![2, 5, 1, 4, 9, 3], (1, 4));
        assert_eq!(trace.outcome(), Some(StepKind::Complete));
        let last = trace.last().unwrap();
        assert_eq!(last.snapshot.total, 19, "5 + 1 + 4 + 9");
        assert_eq!(count(&trace, StepKind::OverlapComplete), 3);
        assert_eq!(count(&trace, StepKind::OverlapPartial), 4);
        assert_eq!(count(&trace, StepKind::OverlapNone), 2);
    }

    #[test]
    fn root_aggregates_the_whole_array() {
        let trace = run(vec![1, 2, 3, 4], (0, 3));
        let first = trace.get(0).unwrap();
        assert_eq!(first.kind, StepKind::OverlapComplete);
        assert_eq!(first.snapshot.nodes[0].sum, 10);
        assert_eq!(trace.last().unwrap().snapshot.total, 10);
    }

    #[test]
    fn internal_sums_equal_children() {
        let trace = run(vec![3, 1, 4, 1, 5, 9, 2, 6], (2, 5));
        let nodes = &trace.last().unwrap().snapshot.nodes;
        for node in nodes {
            if let (Some(l), Some(r)) = (node.left, node.right) {
                assert_eq!(node.sum, nodes[l].sum + nodes[r].sum);
            } else {
                assert_eq!(node.lo, node.hi, "only leaves lack children");
            }
        }
    }

    #[test]
    fn single_element_range() {
        let trace = run(vec![7, 8, 9], (1, 1));
        assert_eq!(trace.last().unwrap().snapshot.total, 8);
    }

    #[test]
    fn out_of_bounds_range_is_rejected() {
        let err = TraceEngine::new(SegmentTreeQuery::new(vec![1, 2], (0, 5)))
            .run()
            .unwrap_err();
        assert_eq!(
            err,
            TraceError::RangeOutOfBounds {
                start: 0,
                end: 5,
                len: 2
            }
        );
        let err = TraceEngine::new(SegmentTreeQuery::new(vec![1, 2], (1, 0)))
            .run()
            .unwrap_err();
        assert!(matches!(err, TraceError::RangeOutOfBounds { .. }));
    }

    #[test]
    fn combine_totals_match_contributions() {
        let trace = run(vec![2, 5, 1, 4, 9, 3], (1, 4));
        for step in trace.iter() {
            let sum: i64 = step.snapshot.contributions.iter().map(|&(_, a)| a).sum();
            assert_eq!(sum, step.snapshot.total);
        }
    }
}
