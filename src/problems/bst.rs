//! Binary search tree lookup as a trace generator.
//!
//! The instance is a value list (inserted in supplied order into a plain,
//! unbalanced BST; duplicates ignored) and a search key. The trace records
//! the descent: a comparison at every node, the branch taken, and a `found`
//! or `not-found` terminal. A missing key is a legitimate outcome, not an
//! error.

use serde::{Deserialize, Serialize};

use crate::arena::{NodeArena, NodeId};
use crate::error::TraceError;
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// BST search problem instance.
#[derive(Debug, Clone)]
pub struct BstSearch {
    values: Vec<i64>,
    key: i64,
}

/// One tree node in flattened snapshot form; children are positions in
/// [`BstSnapshot::nodes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BstNodeSnapshot {
    pub key: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Rendering state for one search step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BstSnapshot {
    pub nodes: Vec<BstNodeSnapshot>,
    /// Position of the root in `nodes`.
    pub root: Option<usize>,
    /// Position of the node under examination.
    pub current: Option<usize>,
    /// Keys compared so far, in descent order.
    pub visited_keys: Vec<i64>,
    /// The key being searched for.
    pub key: i64,
}

#[derive(Debug, Clone)]
struct BstNode {
    key: i64,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl BstSearch {
    pub fn new(values: Vec<i64>, key: i64) -> Self {
        Self { values, key }
    }

    fn build(&self) -> (NodeArena<BstNode>, Option<NodeId>) {
        let mut arena: NodeArena<BstNode> = NodeArena::new();
        let mut root: Option<NodeId> = None;
        for &value in &self.values {
            let Some(mut at) = root else {
                root = Some(arena.alloc(BstNode {
                    key: value,
                    left: None,
                    right: None,
                }));
                continue;
            };
            loop {
                if value == arena[at].key {
                    break; // duplicate, ignored
                }
                let next = if value < arena[at].key {
                    arena[at].left
                } else {
                    arena[at].right
                };
                match next {
                    Some(child) => at = child,
                    None => {
                        let leaf = arena.alloc(BstNode {
                            key: value,
                            left: None,
                            right: None,
                        });
                        if value < arena[at].key {
                            arena[at].left = Some(leaf);
                        } else {
                            arena[at].right = Some(leaf);
                        }
                        break;
                    }
                }
            }
        }
        (arena, root)
    }

    fn snapshot(
        &self,
        arena: &NodeArena<BstNode>,
        root: Option<NodeId>,
        current: Option<NodeId>,
        visited_keys: &[i64],
    ) -> BstSnapshot {
        fn flatten(
            arena: &NodeArena<BstNode>,
            at: Option<NodeId>,
            current: Option<NodeId>,
            out: &mut Vec<BstNodeSnapshot>,
            current_pos: &mut Option<usize>,
        ) -> Option<usize> {
            let id = at?;
            let pos = out.len();
            if current == Some(id) {
                *current_pos = Some(pos);
            }
            out.push(BstNodeSnapshot {
                key: arena[id].key,
                left: None,
                right: None,
            });
            let left = flatten(arena, arena[id].left, current, out, current_pos);
            let right = flatten(arena, arena[id].right, current, out, current_pos);
            out[pos].left = left;
            out[pos].right = right;
            Some(pos)
        }
        let mut nodes = Vec::new();
        let mut current_pos = None;
        let root = flatten(arena, root, current, &mut nodes, &mut current_pos);
        BstSnapshot {
            nodes,
            root,
            current: current_pos,
            visited_keys: visited_keys.to_vec(),
            key: self.key,
        }
    }
}

impl TraceGenerator for BstSearch {
    type Snapshot = BstSnapshot;

    fn name(&self) -> &'static str {
        "bst-search"
    }

    fn validate(&self) -> Result<(), TraceError> {
        if self.values.is_empty() {
            return Err(TraceError::EmptyInput { what: "value list" });
        }
        Ok(())
    }

    fn record(&self, rec: &mut Recorder<BstSnapshot>) {
        let (arena, root) = self.build();
        let key = self.key;
        let mut visited_keys = Vec::new();
        let mut cursor = root;

        while let Some(id) = cursor {
            let node_key = arena[id].key;
            visited_keys.push(node_key);
            rec.push(
                StepKind::Compare,
                self.snapshot(&arena, root, Some(id), &visited_keys),
                format!("comparing {key} with {node_key}"),
            );
            if key == node_key {
                rec.push(
                    StepKind::Found,
                    self.snapshot(&arena, root, Some(id), &visited_keys),
                    format!("found {key} after {} comparisons", visited_keys.len()),
                );
                return;
            }
            let (kind, next, side) = if key < node_key {
                (StepKind::GoLeft, arena[id].left, "left")
            } else {
                (StepKind::GoRight, arena[id].right, "right")
            };
            match next {
                Some(child) => {
                    rec.push(
                        kind,
                        self.snapshot(&arena, root, Some(child), &visited_keys),
                        format!("{key} is {side} of {node_key}; descending"),
                    );
                    cursor = Some(child);
                }
                None => {
                    rec.push(
                        StepKind::NotFound,
                        self.snapshot(&arena, root, Some(id), &visited_keys),
                        format!("{node_key} has no {side} child; {key} is not in the tree"),
                    );
                    return;
                }
            }
        }
    }
}
