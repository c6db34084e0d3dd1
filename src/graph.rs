//! Problem-instance types shared by the graph generators.
//!
//! A [`Graph`] is an immutable undirected vertex/edge list with integer
//! weights. Vertices are addressed by label at the API boundary and by index
//! internally; the index order is the insertion order given to
//! [`Graph::new`], which is also the deterministic tie-break order the
//! generators use.

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Undirected weighted graph instance.
///
/// Never mutated after construction; generators take private working copies
/// of whatever they need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    labels: Vec<String>,
    /// `(from, to, weight)` with endpoints as indices into `labels`,
    /// in the order the edges were supplied.
    edges: Vec<(usize, usize, i64)>,
}

/// An edge with its endpoints spelled out, as snapshots carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledEdge {
    pub from: String,
    pub to: String,
    pub weight: i64,
}

impl std::fmt::Display for LabeledEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} (weight {})", self.from, self.to, self.weight)
    }
}

impl Graph {
    /// Build a graph from vertex labels and `(from, to, weight)` edges.
    ///
    /// # Errors
    /// - [`TraceError::DuplicateVertex`] if a label is supplied twice.
    /// - [`TraceError::UnknownVertex`] if an edge endpoint names no vertex.
    ///
    /// Negative weights are *not* rejected here; traversal generators that
    /// require non-negative weights check in their own `validate`.
    pub fn new<'a>(
        vertices: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = (&'a str, &'a str, i64)>,
    ) -> Result<Self, TraceError> {
        let mut labels: Vec<String> = Vec::new();
        for v in vertices {
            if labels.iter().any(|l| l == v) {
                return Err(TraceError::DuplicateVertex { vertex: v.into() });
            }
            labels.push(v.into());
        }
        let mut resolved = Vec::new();
        for (from, to, weight) in edges {
            let f = labels
                .iter()
                .position(|l| l == from)
                .ok_or_else(|| TraceError::UnknownVertex {
                    vertex: from.into(),
                })?;
            let t = labels
                .iter()
                .position(|l| l == to)
                .ok_or_else(|| TraceError::UnknownVertex { vertex: to.into() })?;
            resolved.push((f, t, weight));
        }
        Ok(Self {
            labels,
            edges: resolved,
        })
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Label of vertex `i`.
    pub fn label(&self, i: usize) -> &str {
        &self.labels[i]
    }

    /// All labels in insertion order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of `label`, if it names a vertex.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Edges as `(from, to, weight)` index triples, in supplied order.
    pub fn edges(&self) -> &[(usize, usize, i64)] {
        &self.edges
    }

    /// Per-vertex adjacency, both directions, neighbors in edge-supply order.
    pub fn adjacency(&self) -> Vec<Vec<(usize, i64)>> {
        let mut adj = vec![Vec::new(); self.labels.len()];
        for &(f, t, w) in &self.edges {
            adj[f].push((t, w));
            if f != t {
                adj[t].push((f, w));
            }
        }
        adj
    }

    /// The snapshot form of edge triple `(from, to, weight)`.
    pub fn labeled(&self, edge: (usize, usize, i64)) -> LabeledEdge {
        LabeledEdge {
            from: self.labels[edge.0].clone(),
            to: self.labels[edge.1].clone(),
            weight: edge.2,
        }
    }

    /// Reject the instance if any edge weight is negative.
    pub(crate) fn require_non_negative(&self) -> Result<(), TraceError> {
        for &(f, t, w) in &self.edges {
            if w < 0 {
                return Err(TraceError::NegativeWeight {
                    from: self.labels[f].clone(),
                    to: self.labels[t].clone(),
                    weight: w,
                });
            }
        }
        Ok(())
    }

    /// Reject the instance if it has no vertices.
    pub(crate) fn require_vertices(&self) -> Result<(), TraceError> {
        if self.labels.is_empty() {
            return Err(TraceError::EmptyInput { what: "graph" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph {
        Graph::new(
            ["A", "B", "C", "D"],
            [("A", "B", 1), ("A", "C", 2), ("B", "D", 3), ("C", "D", 4)],
        )
        .unwrap()
    }

    #[test]
    fn resolves_labels_to_indices() {
        let g = diamond();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.index_of("C"), Some(2));
        assert_eq!(g.edges()[2], (1, 3, 3));
        assert_eq!(g.labeled(g.edges()[0]).to_string(), "A-B (weight 1)");
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let err = Graph::new(["A", "B"], [("A", "Z", 1)]).unwrap_err();
        assert_eq!(err, TraceError::UnknownVertex { vertex: "Z".into() });
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let err = Graph::new(["A", "B", "A"], []).unwrap_err();
        assert_eq!(err, TraceError::DuplicateVertex { vertex: "A".into() });
    }

    #[test]
    fn adjacency_is_undirected() {
        let g = diamond();
        let adj = g.adjacency();
        assert_eq!(adj[0], vec![(1, 1), (2, 2)]);
        assert_eq!(adj[3], vec![(1, 3), (2, 4)]);
    }

    #[test]
    fn negative_weight_detected() {
        let g = Graph::new(["A", "B"], [("A", "B", -5)]).unwrap();
        assert!(matches!(
            g.require_non_negative(),
            Err(TraceError::NegativeWeight { weight: -5, .. })
        ));
    }
}
