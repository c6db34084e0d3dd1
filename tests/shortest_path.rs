use proptest::prelude::*;
use steptrace::problems::bfs::BfsTraversal;
use steptrace::problems::dijkstra::Dijkstra;
use steptrace::{Graph, StepKind, TraceEngine};

/// Floyd–Warshall all-pairs distances; `None` encodes infinity.
fn floyd_warshall(n: usize, edges: &[(usize, usize, i64)]) -> Vec<Vec<Option<i64>>> {
    let mut dist: Vec<Vec<Option<i64>>> = vec![vec![None; n]; n];
    for (v, row) in dist.iter_mut().enumerate() {
        row[v] = Some(0);
    }
    for &(u, v, w) in edges {
        if dist[u][v].map_or(true, |d| w < d) {
            dist[u][v] = Some(w);
            dist[v][u] = Some(w);
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(a), Some(b)) = (dist[i][k], dist[k][j]) {
                    if dist[i][j].map_or(true, |d| a + b < d) {
                        dist[i][j] = Some(a + b);
                    }
                }
            }
        }
    }
    dist
}

fn label(i: usize) -> String {
    format!("V{i}")
}

fn build_graph(n: usize, edges: &[(usize, usize, i64)]) -> Graph {
    let labels: Vec<String> = (0..n).map(label).collect();
    let named: Vec<(String, String, i64)> = edges
        .iter()
        .map(|&(u, v, w)| (label(u), label(v), w))
        .collect();
    Graph::new(
        labels.iter().map(String::as_str),
        named.iter().map(|(u, v, w)| (u.as_str(), v.as_str(), *w)),
    )
    .expect("labels are unique and endpoints resolve")
}

fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, i64)>)> {
    (2usize..=8).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 0i64..15), 0..20)
                .prop_map(|edges| edges.into_iter().filter(|&(u, v, _)| u != v).collect()),
        )
    })
}

proptest! {
    #[test]
    fn dijkstra_matches_floyd_warshall((n, edges) in arb_graph()) {
        let trace = TraceEngine::new(Dijkstra::new(build_graph(n, &edges), "V0"))
            .run()
            .unwrap();
        prop_assert_eq!(trace.outcome(), Some(StepKind::Complete));
        let reference = floyd_warshall(n, &edges);
        let last = trace.last().unwrap();
        for v in 0..n {
            prop_assert_eq!(
                last.snapshot.distances[v],
                reference[0][v],
                "distance to V{} differs", v
            );
        }
    }

    #[test]
    fn bfs_hops_match_unit_weight_distances((n, edges) in arb_graph()) {
        let unit: Vec<(usize, usize, i64)> =
            edges.iter().map(|&(u, v, _)| (u, v, 1)).collect();
        let trace = TraceEngine::new(BfsTraversal::new(build_graph(n, &unit), "V0"))
            .run()
            .unwrap();
        let reference = floyd_warshall(n, &unit);
        let last = trace.last().unwrap();
        for v in 0..n {
            let hops = last.snapshot.hops[v].map(i64::from);
            prop_assert_eq!(hops, reference[0][v], "hops to V{} differ", v);
        }
    }

    #[test]
    fn generation_is_deterministic((n, edges) in arb_graph()) {
        let a = TraceEngine::new(Dijkstra::new(build_graph(n, &edges), "V0"))
            .run()
            .unwrap();
        let b = TraceEngine::new(Dijkstra::new(build_graph(n, &edges), "V0"))
            .run()
            .unwrap();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn unreachable_vertices_keep_infinite_distance() {
    let g = Graph::new(["A", "B", "C", "D"], [("A", "B", 3)]).unwrap();
    let trace = TraceEngine::new(Dijkstra::new(g, "A")).run().unwrap();
    let last = trace.last().unwrap();
    assert_eq!(last.snapshot.distances, vec![Some(0), Some(3), None, None]);
}

#[test]
fn relaxation_only_ever_improves() {
    let g = Graph::new(
        ["A", "B", "C", "D"],
        [("A", "B", 5), ("A", "C", 2), ("C", "B", 1), ("B", "D", 2)],
    )
    .unwrap();
    let trace = TraceEngine::new(Dijkstra::new(g, "A")).run().unwrap();
    let mut best: Vec<Option<i64>> = vec![None; 4];
    for step in trace.iter() {
        for (v, d) in step.snapshot.distances.iter().enumerate() {
            if let (Some(old), Some(new)) = (best[v], *d) {
                assert!(new <= old, "tentative distance of vertex {v} worsened");
            }
            best[v] = d.or(best[v]);
        }
    }
}
