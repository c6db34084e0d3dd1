//! Trace generators, one module per algorithm family.
//!
//! These modules show how to implement
//! [`TraceGenerator`](crate::traits::TraceGenerator) for concrete algorithms.
//!
//! They are both usable and serve as templates:
//! - [`kruskal`]      : Kruskal's MST over a union-find.
//! - [`prim`]         : Prim's MST via sorted-queue frontier expansion.
//! - [`dijkstra`]     : Dijkstra single-source shortest paths.
//! - [`bfs`]          : breadth-first traversal / unweighted shortest path.
//! - [`avl`]          : AVL insert/delete with rotation case analysis.
//! - [`bst`]          : plain binary-search-tree lookup.
//! - [`segment_tree`] : range-sum query with the three-way overlap test.
//! - [`trie`]         : prefix-tree insertion with node sharing.
//! - [`heap_sort`]    : in-place max-heap comparison sort.
//! - [`queue_sim`]    : scripted FIFO queue operations.

pub mod avl;
pub mod bfs;
pub mod bst;
pub mod dijkstra;
pub mod heap_sort;
pub mod kruskal;
pub mod prim;
pub mod queue_sim;
pub mod segment_tree;
pub mod trie;
