//! Union-Find (disjoint set) over a fixed node universe.
//!
//! Used by the Kruskal generator to detect cycles: an edge whose endpoints
//! already share a representative would close a cycle and is rejected.
//!
//! `find` performs full two-pass path compression: after the root is located,
//! every node visited on the way is repointed directly at it. `union` is
//! by rank, incrementing the surviving root's rank on ties.

/// A union-find structure with path compression and union-by-rank.
///
/// Elements are `usize` ordinals in `[0, n)` fixed at construction time.
/// All operations are total over that universe; there are no error cases.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Create `n` singleton sets. Each element starts as its own
    /// representative with rank 0.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Representative of the set containing `x`.
    ///
    /// Two-pass: locate the root, then repoint every node on the traversed
    /// path directly at it. `find(find(x)) == find(x)` always holds, and
    /// after a call the root's own parent is itself.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Returns `false` if they were already in the same set (no structural
    /// change); that return value is the cycle signal. The lower-rank root is
    /// attached under the higher-rank one; on equal ranks the survivor's
    /// rank is incremented.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    /// True iff `a` and `b` currently share a representative.
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of elements in the universe.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns true for an empty universe.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
