//! Algorithm trace and playback engine.
//!
//! This crate runs classical algorithms (MST, shortest path, AVL
//! rebalancing, segment-tree queries, trie insertion, heap sort, ...) and
//! records every atomic operation as an ordered sequence of [`Step`]s, each
//! carrying a full value-copied snapshot of the algorithm's state. A
//! [`PlaybackController`] then moves through that sequence forward,
//! backward, or on a cooperative timer, so any renderer can display
//! `steps[current_index]` without knowing anything about the algorithm.
//!
//! ## Core idea
//! 1. Describe a problem instance with one of the [`problems`] types (or
//!    implement [`TraceGenerator`] for your own).
//! 2. Let [`TraceEngine`] validate the instance and eagerly generate the
//!    complete, immutable [`Trace`].
//! 3. Drive a [`PlaybackController`] over the trace from your event loop.
//!
//! Generation is synchronous and deterministic: the same instance always
//! produces the identical step sequence, and backward navigation never
//! re-simulates anything.
//!
//! ## Quick start
//! ```
//! use steptrace::problems::kruskal::KruskalMst;
//! use steptrace::{Graph, PlaybackController, StepKind, TraceEngine};
//!
//! let graph = Graph::new(
//!     ["A", "B", "C"],
//!     [("A", "B", 1), ("B", "C", 2), ("A", "C", 3)],
//! )?;
//! let trace = TraceEngine::new(KruskalMst::new(graph)).run()?;
//! assert_eq!(trace.outcome(), Some(StepKind::Complete));
//!
//! let mut playback = PlaybackController::new(trace);
//! playback.step_forward();
//! println!("{}", playback.current().unwrap().narrative);
//! # Ok::<(), steptrace::TraceError>(())
//! ```
//!
//! ## Built-in problem families
//! The [`problems`] module contains generators for Kruskal, Prim, Dijkstra,
//! BFS, AVL insert/delete, BST search, segment-tree range queries, trie
//! insertion, heap sort and FIFO queue simulation. These serve both as
//! ready-to-use visualizer backends and as templates for adding your own
//! algorithm family.

pub mod arena;
pub mod builder;
pub mod dsu;
pub mod engine;
pub mod error;
pub mod graph;
pub mod playback;
pub mod pqueue;
pub mod problems;
pub mod step;
pub mod traits;

pub use crate::builder::SessionBuilder;
pub use crate::engine::TraceEngine;
pub use crate::error::TraceError;
pub use crate::graph::{Graph, LabeledEdge};
pub use crate::playback::{PlaybackController, PlaybackState};
pub use crate::step::{Step, StepKind, Trace};
pub use crate::traits::{Recorder, TraceGenerator};
