//! Kruskal's minimum spanning tree as a trace generator.
//!
//! Edges are examined in ascending weight order (stable sort, so equal
//! weights keep their supplied order) against a [`UnionFind`] over the
//! vertices. Every examination, acceptance and cycle rejection is one step;
//! a disconnected graph finishes with an `incomplete` terminal instead of
//! failing.

use serde::{Deserialize, Serialize};

use crate::dsu::UnionFind;
use crate::error::TraceError;
use crate::graph::{Graph, LabeledEdge};
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// Kruskal MST problem instance.
#[derive(Debug, Clone)]
pub struct KruskalMst {
    graph: Graph,
}

/// Rendering state for one Kruskal step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KruskalSnapshot {
    /// Vertex labels in insertion order.
    pub vertices: Vec<String>,
    /// All edges in examination order (ascending weight, ties stable).
    pub sorted_edges: Vec<LabeledEdge>,
    /// Index into `sorted_edges` of the edge under examination.
    pub examining: Option<usize>,
    /// Edges accepted into the spanning tree so far.
    pub mst_edges: Vec<LabeledEdge>,
    /// Sum of accepted edge weights.
    pub total_weight: i64,
    /// Component representative label per vertex, for component coloring.
    pub components: Vec<String>,
}

impl KruskalMst {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn snapshot(
        &self,
        dsu: &mut UnionFind,
        sorted_edges: &[LabeledEdge],
        examining: Option<usize>,
        mst_edges: &[LabeledEdge],
        total_weight: i64,
    ) -> KruskalSnapshot {
        let components = (0..self.graph.vertex_count())
            .map(|v| self.graph.label(dsu.find(v)).to_string())
            .collect();
        KruskalSnapshot {
            vertices: self.graph.labels().to_vec(),
            sorted_edges: sorted_edges.to_vec(),
            examining,
            mst_edges: mst_edges.to_vec(),
            total_weight,
            components,
        }
    }
}

impl TraceGenerator for KruskalMst {
    type Snapshot = KruskalSnapshot;

    fn name(&self) -> &'static str {
        "kruskal-mst"
    }

    fn validate(&self) -> Result<(), TraceError> {
        self.graph.require_vertices()
    }

    fn record(&self, rec: &mut Recorder<KruskalSnapshot>) {
        let n = self.graph.vertex_count();
        let target = n - 1;

        let mut order = self.graph.edges().to_vec();
        order.sort_by_key(|&(_, _, w)| w); // stable: ties keep supplied order
        let sorted_edges: Vec<LabeledEdge> =
            order.iter().map(|&e| self.graph.labeled(e)).collect();

        let mut dsu = UnionFind::new(n);
        let mut mst_edges: Vec<LabeledEdge> = Vec::new();
        let mut total_weight = 0;

        for (i, &(u, v, w)) in order.iter().enumerate() {
            let edge = sorted_edges[i].clone();
            rec.push(
                StepKind::ExamineEdge,
                self.snapshot(&mut dsu, &sorted_edges, Some(i), &mst_edges, total_weight),
                format!("examining edge {edge}"),
            );
            if dsu.union(u, v) {
                mst_edges.push(edge.clone());
                total_weight += w;
                rec.push(
                    StepKind::EdgeAccept,
                    self.snapshot(&mut dsu, &sorted_edges, Some(i), &mst_edges, total_weight),
                    format!("accepted edge {edge} into the spanning tree"),
                );
                if mst_edges.len() == target {
                    if i + 1 < order.len() {
                        rec.push(
                            StepKind::EarlyTermination,
                            self.snapshot(
                                &mut dsu,
                                &sorted_edges,
                                None,
                                &mst_edges,
                                total_weight,
                            ),
                            format!(
                                "spanning tree complete after examining {} of {} edges",
                                i + 1,
                                order.len()
                            ),
                        );
                    }
                    break;
                }
            } else {
                rec.push(
                    StepKind::EdgeReject,
                    self.snapshot(&mut dsu, &sorted_edges, Some(i), &mst_edges, total_weight),
                    format!("rejected edge {edge}: it would close a cycle"),
                );
            }
        }

        let snap = self.snapshot(&mut dsu, &sorted_edges, None, &mst_edges, total_weight);
        if mst_edges.len() == target {
            rec.push(
                StepKind::Complete,
                snap,
                format!(
                    "minimum spanning tree complete: {} edges, total weight {total_weight}",
                    mst_edges.len()
                ),
            );
        } else {
            rec.push(
                StepKind::Incomplete,
                snap,
                format!(
                    "graph is disconnected: found {} of {target} spanning edges",
                    mst_edges.len()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceEngine;

    fn run(graph: Graph) -> crate::Trace<KruskalSnapshot> {
        TraceEngine::new(KruskalMst::new(graph)).run().unwrap()
    }

    #[test]
    fn cycle_edge_is_rejected() {
        // B-C closes the A-B-C cycle and sorts before the edge that
        // completes the tree, so it is examined and rejected.
        let g = Graph::new(
            ["A", "B", "C", "D"],
            [("A", "B", 1), ("A", "C", 2), ("B", "C", 3), ("C", "D", 4)],
        )
        .unwrap();
        let trace = run(g);
        assert_eq!(trace.outcome(), Some(StepKind::Complete));
        let rejects: Vec<_> = trace
            .iter()
            .filter(|s| s.kind == StepKind::EdgeReject)
            .collect();
        assert_eq!(rejects.len(), 1);
        assert_eq!(rejects[0].snapshot.sorted_edges[2].weight, 3);
        let last = trace.last().unwrap();
        assert_eq!(last.snapshot.total_weight, 7);
        assert_eq!(last.snapshot.mst_edges.len(), 3);
    }

    #[test]
    fn disconnected_graph_finishes_incomplete() {
        let g = Graph::new(["A", "B", "C", "D"], [("A", "B", 1), ("C", "D", 2)]).unwrap();
        let trace = run(g);
        assert_eq!(trace.outcome(), Some(StepKind::Incomplete));
        assert_eq!(trace.last().unwrap().snapshot.mst_edges.len(), 2);
    }

    #[test]
    fn equal_weights_examined_in_supplied_order() {
        let g = Graph::new(
            ["A", "B", "C"],
            [("B", "C", 1), ("A", "B", 1), ("A", "C", 1)],
        )
        .unwrap();
        let trace = run(g);
        let first = trace.get(0).unwrap();
        assert_eq!(first.snapshot.sorted_edges[0].from, "B");
        assert_eq!(first.snapshot.sorted_edges[1].from, "A");
    }

    #[test]
    fn early_termination_only_with_edges_left_over() {
        let g = Graph::new(["A", "B"], [("A", "B", 1)]).unwrap();
        let trace = run(g);
        assert!(
            trace
                .iter()
                .all(|s| s.kind != StepKind::EarlyTermination),
            "single-edge graph has nothing left to skip"
        );
        let g = Graph::new(["A", "B"], [("A", "B", 1), ("A", "B", 2)]).unwrap();
        let trace = run(g);
        assert!(trace
            .iter()
            .any(|s| s.kind == StepKind::EarlyTermination));
    }

    #[test]
    fn components_track_union_progress() {
        let g = Graph::new(["A", "B", "C"], [("A", "B", 1), ("B", "C", 2)]).unwrap();
        let trace = run(g);
        let first = trace.get(0).unwrap();
        assert_eq!(first.snapshot.components, vec!["A", "B", "C"]);
        let last = trace.last().unwrap();
        let rep = &last.snapshot.components[0];
        assert!(last.snapshot.components.iter().all(|c| c == rep));
    }

    #[test]
    fn empty_graph_is_rejected() {
        let g = Graph::new([], []).unwrap();
        let err = TraceEngine::new(KruskalMst::new(g)).run().unwrap_err();
        assert_eq!(err, TraceError::EmptyInput { what: "graph" });
    }
}
