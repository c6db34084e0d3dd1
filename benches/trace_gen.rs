use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use steptrace::problems::avl::AvlScript;
use steptrace::problems::kruskal::KruskalMst;
use steptrace::{Graph, TraceEngine};

/// Connected random graph: a random spanning tree plus `extra` chords.
fn random_graph(rng: &mut StdRng, n: usize, extra: usize) -> Graph {
    let labels: Vec<String> = (0..n).map(|i| format!("V{i}")).collect();
    let mut edges: Vec<(usize, usize, i64)> = Vec::new();
    for v in 1..n {
        let u = rng.gen_range(0..v);
        edges.push((u, v, rng.gen_range(0..50)));
    }
    for _ in 0..extra {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            edges.push((u, v, rng.gen_range(0..50)));
        }
    }
    let named: Vec<(String, String, i64)> = edges
        .iter()
        .map(|&(u, v, w)| (labels[u].clone(), labels[v].clone(), w))
        .collect();
    Graph::new(
        labels.iter().map(String::as_str),
        named.iter().map(|(u, v, w)| (u.as_str(), v.as_str(), *w)),
    )
    .expect("generated labels are unique and endpoints resolve")
}

fn bench_kruskal_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("kruskal_trace");
    for &n in &[8usize, 16, 32] {
        group.bench_function(format!("vertices_{n}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(42);
                    random_graph(&mut rng, n, n * 2)
                },
                |graph| {
                    let trace = TraceEngine::new(KruskalMst::new(graph)).run().unwrap();
                    criterion::black_box(trace.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_avl_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("avl_trace");
    for &ops in &[50usize, 200] {
        group.bench_function(format!("inserts_{ops}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(7);
                    (0..ops).map(|_| rng.gen_range(-1000..1000)).collect::<Vec<i64>>()
                },
                |keys| {
                    let trace = TraceEngine::new(AvlScript::inserts(keys)).run().unwrap();
                    criterion::black_box(trace.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kruskal_trace, bench_avl_trace);
criterion_main!(benches);
