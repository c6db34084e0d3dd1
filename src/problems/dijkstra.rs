//! Dijkstra's shortest path as a trace generator.
//!
//! Each iteration settles the unvisited vertex with minimum tentative
//! distance (ties broken by vertex insertion order), then relaxes its
//! neighbors: one `update` step per improved neighbor, or a single
//! `no-update` step when nothing improved. Reaching the target finishes the
//! trace with `target-reached` and the reconstructed path; exhausting the
//! frontier finishes with `complete`, unreachable vertices keeping an
//! infinite distance.
//!
//! Negative edge weights are rejected by `validate`; relaxation order is
//! meaningless under them.

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::graph::Graph;
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// Dijkstra problem instance: graph, start vertex, optional target.
#[derive(Debug, Clone)]
pub struct Dijkstra {
    graph: Graph,
    start: String,
    target: Option<String>,
}

/// Rendering state for one Dijkstra step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DijkstraSnapshot {
    /// Vertex labels in insertion order.
    pub vertices: Vec<String>,
    /// Tentative distance per vertex; `None` renders as infinity.
    pub distances: Vec<Option<i64>>,
    /// Settled flag per vertex.
    pub visited: Vec<bool>,
    /// Predecessor label per vertex on its current best path.
    pub predecessors: Vec<Option<String>>,
    /// The vertex being settled or relaxed from in this step.
    pub current: Option<String>,
    /// Start-to-target path, filled once the target is reached.
    pub path: Vec<String>,
}

impl Dijkstra {
    /// Shortest paths from `start` to every reachable vertex.
    pub fn new(graph: Graph, start: impl Into<String>) -> Self {
        Self {
            graph,
            start: start.into(),
            target: None,
        }
    }

    /// Stop as soon as `target` is settled and report the path to it.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn snapshot(
        &self,
        distances: &[Option<i64>],
        visited: &[bool],
        predecessors: &[Option<usize>],
        current: Option<usize>,
        path: &[usize],
    ) -> DijkstraSnapshot {
        DijkstraSnapshot {
            vertices: self.graph.labels().to_vec(),
            distances: distances.to_vec(),
            visited: visited.to_vec(),
            predecessors: predecessors
                .iter()
                .map(|p| p.map(|u| self.graph.label(u).to_string()))
                .collect(),
            current: current.map(|u| self.graph.label(u).to_string()),
            path: path.iter().map(|&u| self.graph.label(u).to_string()).collect(),
        }
    }
}

impl TraceGenerator for Dijkstra {
    type Snapshot = DijkstraSnapshot;

    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn validate(&self) -> Result<(), TraceError> {
        self.graph.require_vertices()?;
        self.graph.require_non_negative()?;
        for label in std::iter::once(&self.start).chain(self.target.as_ref()) {
            if self.graph.index_of(label).is_none() {
                return Err(TraceError::UnknownVertex {
                    vertex: label.clone(),
                });
            }
        }
        Ok(())
    }

    fn record(&self, rec: &mut Recorder<DijkstraSnapshot>) {
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

        let mut distances: Vec<Option<i64>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        distances[start] = Some(0);

        loop {
            // Minimum tentative distance among unvisited vertices; strict
            // comparison keeps ties on vertex insertion order.
            let mut best: Option<(i64, usize)> = None;
            for (v, d) in distances.iter().enumerate() {
                if visited[v] {
                    continue;
                }
                if let Some(d) = *d {
                    if best.map_or(true, |(bd, _)| d < bd) {
                        best = Some((d, v));
                    }
                }
            }
            let Some((d, u)) = best else { break };

            visited[u] = true;
            rec.push(
                StepKind::Select,
                self.snapshot(&distances, &visited, &predecessors, Some(u), &[]),
                format!(
                    "selecting vertex {} with tentative distance {d}",
                    self.graph.label(u)
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
                    self.snapshot(&distances, &visited, &predecessors, Some(u), &path),
                    format!("reached target {} with distance {d}", self.graph.label(u)),
                );
                return;
            }

            let mut improved = 0;
            for &(v, w) in &adj[u] {
                if visited[v] {
                    continue;
                }
                let candidate = d + w;
                if distances[v].map_or(true, |dv| candidate < dv) {
                    distances[v] = Some(candidate);
                    predecessors[v] = Some(u);
                    improved += 1;
                    rec.push(
                        StepKind::Update,
                        self.snapshot(&distances, &visited, &predecessors, Some(u), &[]),
                        format!(
                            "updated distance of {} to {candidate} via {}",
                            self.graph.label(v),
                            self.graph.label(u)
                        ),
                    );
                }
            }
            if improved == 0 {
                rec.push(
                    StepKind::NoUpdate,
                    self.snapshot(&distances, &visited, &predecessors, Some(u), &[]),
                    format!("no neighbor of {} improved", self.graph.label(u)),
                );
            }
        }

        let narrative = match target {
            Some(t) => format!(
                "target {} is unreachable: its distance remains infinite",
                self.graph.label(t)
            ),
            None => "all reachable vertices settled".to_string(),
        };
        rec.push(
            StepKind::Complete,
            self.snapshot(&distances, &visited, &predecessors, None, &[]),
            narrative,
        );
    }
}
