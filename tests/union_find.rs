use proptest::prelude::*;
use steptrace::dsu::UnionFind;

/// Brute-force component labels: repeatedly merge labels across the union
/// pairs until a fixpoint.
fn component_labels(n: usize, pairs: &[(usize, usize)]) -> Vec<usize> {
    let mut comp: Vec<usize> = (0..n).collect();
    loop {
        let mut changed = false;
        for &(a, b) in pairs {
            let (ca, cb) = (comp[a], comp[b]);
            if ca != cb {
                let keep = ca.min(cb);
                let drop = ca.max(cb);
                for c in comp.iter_mut() {
                    if *c == drop {
                        *c = keep;
                    }
                }
                changed = true;
            }
        }
        if !changed {
            return comp;
        }
    }
}

fn arb_pairs() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..24),
        )
    })
}

proptest! {
    #[test]
    fn connected_matches_brute_force_components((n, pairs) in arb_pairs()) {
        let mut uf = UnionFind::new(n);
        for &(a, b) in &pairs {
            uf.union(a, b);
        }
        let comp = component_labels(n, &pairs);
        for a in 0..n {
            for b in 0..n {
                prop_assert_eq!(
                    uf.connected(a, b),
                    comp[a] == comp[b],
                    "disagreement on ({}, {})", a, b
                );
            }
        }
    }

    #[test]
    fn find_is_idempotent((n, pairs) in arb_pairs()) {
        let mut uf = UnionFind::new(n);
        for &(a, b) in &pairs {
            uf.union(a, b);
        }
        for x in 0..n {
            let r = uf.find(x);
            prop_assert_eq!(uf.find(r), r);
            prop_assert_eq!(uf.find(x), r);
        }
    }

    #[test]
    fn union_returns_false_iff_already_connected((n, pairs) in arb_pairs()) {
        let mut uf = UnionFind::new(n);
        for &(a, b) in &pairs {
            let was_connected = uf.connected(a, b);
            let merged = uf.union(a, b);
            prop_assert_eq!(merged, !was_connected);
        }
    }
}
