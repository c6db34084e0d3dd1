//! Prim's minimum spanning tree as a trace generator.
//!
//! A frontier expansion driven by the [`SortedQueue`]: the queue is seeded
//! with every edge touching the start vertex, and each iteration dequeues the
//! minimum-weight edge. Edges whose endpoints are both already in the tree
//! are skipped (cycle avoidance); otherwise the edge is accepted, the new
//! vertex visited, and its outgoing edges join the frontier.

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::graph::{Graph, LabeledEdge};
use crate::pqueue::SortedQueue;
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// Prim MST problem instance: a graph and the vertex to grow from.
#[derive(Debug, Clone)]
pub struct PrimMst {
    graph: Graph,
    start: String,
}

/// Rendering state for one Prim step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimSnapshot {
    /// Vertex labels in insertion order.
    pub vertices: Vec<String>,
    /// Visited flag per vertex.
    pub visited: Vec<bool>,
    /// Queue contents in priority order (the candidate frontier).
    pub frontier: Vec<LabeledEdge>,
    /// The edge dequeued in this step, if any.
    pub current_edge: Option<LabeledEdge>,
    /// Edges accepted into the spanning tree so far.
    pub mst_edges: Vec<LabeledEdge>,
    /// Sum of accepted edge weights.
    pub total_weight: i64,
}

impl PrimMst {
    pub fn new(graph: Graph, start: impl Into<String>) -> Self {
        Self {
            graph,
            start: start.into(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn snapshot(
        &self,
        visited: &[bool],
        queue: &SortedQueue<(usize, usize)>,
        current_edge: Option<LabeledEdge>,
        mst_edges: &[LabeledEdge],
        total_weight: i64,
    ) -> PrimSnapshot {
        let frontier = queue
            .iter()
            .map(|&((u, v), w)| self.graph.labeled((u, v, w)))
            .collect();
        PrimSnapshot {
            vertices: self.graph.labels().to_vec(),
            visited: visited.to_vec(),
            frontier,
            current_edge,
            mst_edges: mst_edges.to_vec(),
            total_weight,
        }
    }
}

impl TraceGenerator for PrimMst {
    type Snapshot = PrimSnapshot;

    fn name(&self) -> &'static str {
        "prim-mst"
    }

    fn validate(&self) -> Result<(), TraceError> {
        self.graph.require_vertices()?;
        self.graph.require_non_negative()?;
        if self.graph.index_of(&self.start).is_none() {
            return Err(TraceError::UnknownVertex {
                vertex: self.start.clone(),
            });
        }
        Ok(())
    }

    fn record(&self, rec: &mut Recorder<PrimSnapshot>) {
        let n = self.graph.vertex_count();
        let adj = self.graph.adjacency();
        let start = self
            .graph
            .index_of(&self.start)
            .expect("start vertex checked in validate");

        let mut visited = vec![false; n];
        let mut queue: SortedQueue<(usize, usize)> = SortedQueue::new();
        let mut mst_edges: Vec<LabeledEdge> = Vec::new();
        let mut total_weight = 0;

        visited[start] = true;
        let mut visited_count = 1;
        for &(to, w) in &adj[start] {
            if to != start {
                queue.push((start, to), w);
            }
        }
        rec.push(
            StepKind::Visit,
            self.snapshot(&visited, &queue, None, &mst_edges, total_weight),
            format!(
                "starting at vertex {} with {} candidate edges",
                self.start,
                queue.len()
            ),
        );

        while let Some(((u, v), w)) = queue.pop() {
            let edge = self.graph.labeled((u, v, w));
            if visited[u] && visited[v] {
                rec.push(
                    StepKind::EdgeSkip,
                    self.snapshot(&visited, &queue, Some(edge.clone()), &mst_edges, total_weight),
                    format!("skipping edge {edge}: both endpoints already reached"),
                );
                continue;
            }
            let next = if visited[u] { v } else { u };
            mst_edges.push(edge.clone());
            total_weight += w;
            rec.push(
                StepKind::EdgeAccept,
                self.snapshot(&visited, &queue, Some(edge.clone()), &mst_edges, total_weight),
                format!("accepted edge {edge} into the spanning tree"),
            );
            visited[next] = true;
            visited_count += 1;
            for &(to, w2) in &adj[next] {
                if !visited[to] {
                    queue.push((next, to), w2);
                }
            }
            rec.push(
                StepKind::Visit,
                self.snapshot(&visited, &queue, None, &mst_edges, total_weight),
                format!("visiting vertex {}", self.graph.label(next)),
            );
            if visited_count == n {
                break;
            }
        }

        let snap = self.snapshot(&visited, &queue, None, &mst_edges, total_weight);
        if visited_count == n {
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
                format!("graph is disconnected: reached {visited_count} of {n} vertices"),
            );
        }
    }
}
