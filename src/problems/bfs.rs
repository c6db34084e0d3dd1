//! Breadth-first traversal as a trace generator.
//!
//! The unweighted sibling of the shortest-path family: vertices are
//! discovered in hop order through a FIFO worklist. Discovery emits
//! `enqueue`, processing emits `visit`, and an optional target finishes the
//! trace with `target-reached` and the hop-minimal path. Edge weights, if
//! present on the graph, are ignored.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::graph::Graph;
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// BFS problem instance: graph, start vertex, optional target.
#[derive(Debug, Clone)]
pub struct BfsTraversal {
    graph: Graph,
    start: String,
    target: Option<String>,
}

/// Rendering state for one BFS step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BfsSnapshot {
    /// Vertex labels in insertion order.
    pub vertices: Vec<String>,
    /// Worklist contents, front first.
    pub queue: Vec<String>,
    /// Discovered flag per vertex.
    pub discovered: Vec<bool>,
    /// Hop count per vertex; `None` renders as infinity.
    pub hops: Vec<Option<u32>>,
    /// The vertex handled in this step.
    pub current: Option<String>,
    /// Vertices in visit (dequeue) order so far.
    pub visit_order: Vec<String>,
    /// Start-to-target path, filled once the target is visited.
    pub path: Vec<String>,
}

impl BfsTraversal {
    /// Traverse the whole component containing `start`.
    pub fn new(graph: Graph, start: impl Into<String>) -> Self {
        Self {
            graph,
            start: start.into(),
            target: None,
        }
    }

    /// Stop as soon as `target` is visited and report the hop-minimal path.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[allow(clippy::too_many_arguments)]
    fn snapshot(
        &self,
        queue: &VecDeque<usize>,
        discovered: &[bool],
        hops: &[Option<u32>],
        current: Option<usize>,
        visit_order: &[usize],
        path: &[usize],
    ) -> BfsSnapshot {
        let label = |&u: &usize| self.graph.label(u).to_string();
        BfsSnapshot {
            vertices: self.graph.labels().to_vec(),
            queue: queue.iter().map(|u| label(u)).collect(),
            discovered: discovered.to_vec(),
            hops: hops.to_vec(),
            current: current.map(|u| label(&u)),
            visit_order: visit_order.iter().map(label).collect(),
            path: path.iter().map(label).collect(),
        }
    }
}

impl TraceGenerator for BfsTraversal {
    type Snapshot = BfsSnapshot;

    fn name(&self) -> &'static str {
        "bfs"
    }

    fn validate(&self) -> Result<(), TraceError> {
        self.graph.require_vertices()?;
        for label in std::iter::once(&self.start).chain(self.target.as_ref()) {
            if self.graph.index_of(label).is_none() {
                return Err(TraceError::UnknownVertex {
                    vertex: label.clone(),
                });
            }
        }
        Ok(())
    }

    fn record(&self, rec: &mut Recorder<BfsSnapshot>) {
        let n = self.graph.vertex_count();
        let adj = self.graph.adjacency();
        let start = self
            .graph
            .index_of(&self.start)
            .expect("start vertex checked in validate");
        let target = self
            .target
            .as_ref()
            .map(|t| self.graph.index_of(t).expect("target vertex checked in validate"));

        let mut queue: VecDeque<usize> = VecDeque::new();
        let mut discovered = vec![false; n];
        let mut hops: Vec<Option<u32>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut visit_order: Vec<usize> = Vec::new();

        discovered[start] = true;
        hops[start] = Some(0);
        queue.push_back(start);
        rec.push(
            StepKind::Enqueue,
            self.snapshot(&queue, &discovered, &hops, Some(start), &visit_order, &[]),
            format!("enqueued start vertex {}", self.start),
        );

        while let Some(u) = queue.pop_front() {
            visit_order.push(u);
            rec.push(
                StepKind::Visit,
                self.snapshot(&queue, &discovered, &hops, Some(u), &visit_order, &[]),
                format!(
                    "visiting vertex {} at {} hops",
                    self.graph.label(u),
                    hops[u].unwrap_or(0)
                ),
            );
            if target == Some(u) {
                let mut path = vec![u];
                while let Some(p) = predecessors[path[path.len() - 1]] {
                    path.push(p);
                }
                path.reverse();
                rec.push(
                    StepKind::TargetReached,
                    self.snapshot(&queue, &discovered, &hops, Some(u), &visit_order, &path),
                    format!(
                        "reached target {} in {} hops",
                        self.graph.label(u),
                        hops[u].unwrap_or(0)
                    ),
                );
                return;
            }
            for &(v, _) in &adj[u] {
                if !discovered[v] {
                    discovered[v] = true;
                    hops[v] = hops[u].map(|h| h + 1);
                    predecessors[v] = Some(u);
                    queue.push_back(v);
                    rec.push(
                        StepKind::Enqueue,
                        self.snapshot(&queue, &discovered, &hops, Some(v), &visit_order, &[]),
                        format!(
                            "discovered {} from {}",
                            self.graph.label(v),
                            self.graph.label(u)
                        ),
                    );
                }
            }
        }

        let narrative = match target {
            Some(t) => format!(
                "target {} is unreachable from {}",
                self.graph.label(t),
                self.start
            ),
            None => format!("traversal complete: visited {} vertices", visit_order.len()),
        };
        rec.push(
            StepKind::Complete,
            self.snapshot(&queue, &discovered, &hops, None, &visit_order, &[]),
            narrative,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceEngine;

    fn grid() -> Graph {
        Graph::new(
            ["A", "B", "C", "D", "E", "F"],
            [
                ("A", "B", 1),
                ("A", "C", 1),
                ("B", "D", 1),
                ("C", "D", 1),
                ("D", "E", 1),
                ("E", "F", 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn visits_in_hop_order() {
        let trace = TraceEngine::new(BfsTraversal::new(grid(), "A"))
            .run()
            .unwrap();
        assert_eq!(trace.outcome(), Some(StepKind::Complete));
        let last = trace.last().unwrap();
        assert_eq!(last.snapshot.visit_order, vec!["A", "B", "C", "D", "E", "F"]);
        assert_eq!(
            last.snapshot.hops,
            vec![Some(0), Some(1), Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn target_path_is_hop_minimal() {
        let trace = TraceEngine::new(BfsTraversal::new(grid(), "A").with_target("E"))
            .run()
            .unwrap();
        assert_eq!(trace.outcome(), Some(StepKind::TargetReached));
        let path = &trace.last().unwrap().snapshot.path;
        assert_eq!(path.first().map(String::as_str), Some("A"));
        assert_eq!(path.last().map(String::as_str), Some("E"));
        assert_eq!(path.len(), 4, "A -> B -> D -> E");
    }

    #[test]
    fn unreachable_target_completes() {
        let g = Graph::new(["A", "B", "C"], [("A", "B", 1)]).unwrap();
        let trace = TraceEngine::new(BfsTraversal::new(g, "A").with_target("C"))
            .run()
            .unwrap();
        assert_eq!(trace.outcome(), Some(StepKind::Complete));
        assert_eq!(trace.last().unwrap().snapshot.hops[2], None);
    }

    #[test]
    fn every_vertex_enqueued_exactly_once() {
        let trace = TraceEngine::new(BfsTraversal::new(grid(), "A"))
            .run()
            .unwrap();
        let enqueues = trace
            .iter()
            .filter(|s| s.kind == StepKind::Enqueue)
            .count();
        assert_eq!(enqueues, 6);
    }
}
