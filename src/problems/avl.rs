//! AVL tree insert/delete as a trace generator.
//!
//! The instance is a script of insert and delete operations applied to an
//! initially empty tree. Nodes live in a [`NodeArena`] and reference children
//! by id; removed nodes simply become unreachable. Every comparison on the
//! way down and every rotation on the way back up is one step, and each
//! snapshot carries the whole tree in flattened form, so the rebalancing
//! cases replay exactly.
//!
//! Rebalancing case table (balance = height(left) - height(right)):
//! - balance > 1, key below left child  -> right rotation (left-left)
//! - balance < -1, key above right child -> left rotation (right-right)
//! - balance > 1, key above left child  -> left-right double rotation
//! - balance < -1, key below right child -> right-left double rotation
//!
//! Deletion rebalances with the child's own balance factor instead of the
//! removed key, and may rotate at several ancestors.

use serde::{Deserialize, Serialize};

use crate::arena::{NodeArena, NodeId};
use crate::error::TraceError;
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// One scripted tree operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "op", content = "key")]
pub enum AvlOp {
    Insert(i64),
    Delete(i64),
}

/// AVL problem instance: the operation script.
#[derive(Debug, Clone)]
pub struct AvlScript {
    ops: Vec<AvlOp>,
}

/// One tree node in flattened snapshot form; children are positions in
/// [`AvlSnapshot::nodes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvlNodeSnapshot {
    pub key: i64,
    pub height: i32,
    pub balance: i32,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

/// Rendering state for one AVL step: the whole tree, flattened in preorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvlSnapshot {
    pub nodes: Vec<AvlNodeSnapshot>,
    /// Position of the root in `nodes`.
    pub root: Option<usize>,
    /// Which script operation this step belongs to (0-based).
    pub op_index: usize,
    /// The key the current operation concerns.
    pub active_key: Option<i64>,
}

impl AvlSnapshot {
    /// Keys in symmetric (sorted) order.
    pub fn in_order_keys(&self) -> Vec<i64> {
        fn walk(nodes: &[AvlNodeSnapshot], at: Option<usize>, out: &mut Vec<i64>) {
            if let Some(i) = at {
                walk(nodes, nodes[i].left, out);
                out.push(nodes[i].key);
                walk(nodes, nodes[i].right, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, self.root, &mut out);
        out
    }
}

#[derive(Debug, Clone)]
struct AvlNode {
    key: i64,
    height: i32,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Mutable working tree, private to one generation run.
struct Working {
    arena: NodeArena<AvlNode>,
    root: Option<NodeId>,
    op_index: usize,
}

impl Working {
    fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            op_index: 0,
        }
    }

    fn height(&self, id: Option<NodeId>) -> i32 {
        id.map_or(0, |id| self.arena[id].height)
    }

    fn balance(&self, id: NodeId) -> i32 {
        self.height(self.arena[id].left) - self.height(self.arena[id].right)
    }

    fn update_height(&mut self, id: NodeId) {
        let h = 1 + self.height(self.arena[id].left).max(self.height(self.arena[id].right));
        self.arena[id].height = h;
    }

    /// Detach the pivot's left child, lift it, re-parent the pivot under it.
    /// Heights are fixed bottom-up. Returns the new subtree root.
    fn rotate_right(&mut self, pivot: NodeId) -> NodeId {
        let lifted = self.arena[pivot].left.expect("right rotation needs a left child");
        let middle = self.arena[lifted].right;
        self.arena[lifted].right = Some(pivot);
        self.arena[pivot].left = middle;
        self.update_height(pivot);
        self.update_height(lifted);
        lifted
    }

    fn rotate_left(&mut self, pivot: NodeId) -> NodeId {
        let lifted = self.arena[pivot].right.expect("left rotation needs a right child");
        let middle = self.arena[lifted].left;
        self.arena[lifted].left = Some(pivot);
        self.arena[pivot].right = middle;
        self.update_height(pivot);
        self.update_height(lifted);
        lifted
    }

    /// Point `parent`'s link at `new_child` instead of `old_child`;
    /// `parent == None` rewrites the root.
    fn replace_child(&mut self, parent: Option<NodeId>, old_child: NodeId, new_child: Option<NodeId>) {
        match parent {
            None => self.root = new_child,
            Some(p) => {
                if self.arena[p].left == Some(old_child) {
                    self.arena[p].left = new_child;
                } else {
                    self.arena[p].right = new_child;
                }
            }
        }
    }

    fn snapshot(&self, active_key: Option<i64>) -> AvlSnapshot {
        fn flatten(
            w: &Working,
            at: Option<NodeId>,
            out: &mut Vec<AvlNodeSnapshot>,
        ) -> Option<usize> {
            let id = at?;
            let node = &w.arena[id];
            let pos = out.len();
            out.push(AvlNodeSnapshot {
                key: node.key,
                height: node.height,
                balance: w.balance(id),
                left: None,
                right: None,
            });
            let left = flatten(w, node.left, out);
            let right = flatten(w, node.right, out);
            out[pos].left = left;
            out[pos].right = right;
            Some(pos)
        }
        let mut nodes = Vec::new();
        let root = flatten(self, self.root, &mut nodes);
        AvlSnapshot {
            nodes,
            root,
            op_index: self.op_index,
            active_key,
        }
    }
}

impl AvlScript {
    pub fn new(ops: Vec<AvlOp>) -> Self {
        Self { ops }
    }

    /// Convenience: a pure insertion script.
    pub fn inserts(keys: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ops: keys.into_iter().map(AvlOp::Insert).collect(),
        }
    }

    pub fn ops(&self) -> &[AvlOp] {
        &self.ops
    }

    fn insert(&self, w: &mut Working, key: i64, rec: &mut Recorder<AvlSnapshot>) {
        let mut path: Vec<NodeId> = Vec::new();
        let mut cursor = w.root;
        while let Some(id) = cursor {
            let node_key = w.arena[id].key;
            rec.push(
                StepKind::Compare,
                w.snapshot(Some(key)),
                format!("comparing {key} with {node_key}"),
            );
            if key == node_key {
                rec.push(
                    StepKind::AlreadyExists,
                    w.snapshot(Some(key)),
                    format!("{key} already exists; tree unchanged"),
                );
                return;
            }
            path.push(id);
            cursor = if key < node_key {
                w.arena[id].left
            } else {
                w.arena[id].right
            };
        }

        let leaf = w.arena.alloc(AvlNode {
            key,
            height: 1,
            left: None,
            right: None,
        });
        match path.last() {
            None => w.root = Some(leaf),
            Some(&parent) => {
                if key < w.arena[parent].key {
                    w.arena[parent].left = Some(leaf);
                } else {
                    w.arena[parent].right = Some(leaf);
                }
            }
        }
        rec.push(
            StepKind::Insert,
            w.snapshot(Some(key)),
            format!("inserted {key} as a leaf"),
        );

        // Unwind: recompute heights, fix the first (and only) imbalance.
        for pos in (0..path.len()).rev() {
            let id = path[pos];
            w.update_height(id);
            let balance = w.balance(id);
            if !(-1..=1).contains(&balance) {
                let parent = if pos == 0 { None } else { Some(path[pos - 1]) };
                self.rebalance_insert(w, id, parent, key, balance, rec);
            }
        }
    }

    fn rebalance_insert(
        &self,
        w: &mut Working,
        id: NodeId,
        parent: Option<NodeId>,
        key: i64,
        balance: i32,
        rec: &mut Recorder<AvlSnapshot>,
    ) {
        let pivot_key = w.arena[id].key;
        if balance > 1 {
            let left = w.arena[id].left.expect("left-heavy node has a left child");
            let left_key = w.arena[left].key;
            if key > left_key {
                // Left-right: straighten the left child first.
                let new_left = w.rotate_left(left);
                w.arena[id].left = Some(new_left);
                rec.push(
                    StepKind::RotateLeft,
                    w.snapshot(Some(key)),
                    format!("left-right imbalance at {pivot_key}: rotating left around {left_key}"),
                );
            }
            let lifted = w.rotate_right(id);
            w.replace_child(parent, id, Some(lifted));
            rec.push(
                StepKind::RotateRight,
                w.snapshot(Some(key)),
                format!(
                    "rotating right around {pivot_key}; {} becomes the subtree root",
                    w.arena[lifted].key
                ),
            );
        } else {
            let right = w.arena[id].right.expect("right-heavy node has a right child");
            let right_key = w.arena[right].key;
            if key < right_key {
                // Right-left: straighten the right child first.
                let new_right = w.rotate_right(right);
                w.arena[id].right = Some(new_right);
                rec.push(
                    StepKind::RotateRight,
                    w.snapshot(Some(key)),
                    format!(
                        "right-left imbalance at {pivot_key}: rotating right around {right_key}"
                    ),
                );
            }
            let lifted = w.rotate_left(id);
            w.replace_child(parent, id, Some(lifted));
            rec.push(
                StepKind::RotateLeft,
                w.snapshot(Some(key)),
                format!(
                    "rotating left around {pivot_key}; {} becomes the subtree root",
                    w.arena[lifted].key
                ),
            );
        }
    }

    fn delete(&self, w: &mut Working, key: i64, rec: &mut Recorder<AvlSnapshot>) {
        let mut path: Vec<NodeId> = Vec::new();
        let mut cursor = w.root;
        let mut found = None;
        while let Some(id) = cursor {
            let node_key = w.arena[id].key;
            rec.push(
                StepKind::Compare,
                w.snapshot(Some(key)),
                format!("comparing {key} with {node_key}"),
            );
            if key == node_key {
                found = Some(id);
                break;
            }
            path.push(id);
            cursor = if key < node_key {
                w.arena[id].left
            } else {
                w.arena[id].right
            };
        }
        let Some(id) = found else {
            rec.push(
                StepKind::NotFound,
                w.snapshot(Some(key)),
                format!("{key} not found; tree unchanged"),
            );
            return;
        };

        let narrative = match (w.arena[id].left, w.arena[id].right) {
            (Some(_), Some(right)) => {
                // Copy the in-order successor's key here, then physically
                // remove the successor (which has no left child).
                path.push(id);
                let mut succ = right;
                while let Some(l) = w.arena[succ].left {
                    path.push(succ);
                    succ = l;
                }
                let succ_key = w.arena[succ].key;
                w.arena[id].key = succ_key;
                let succ_parent = path.last().copied();
                let succ_right = w.arena[succ].right;
                w.replace_child(succ_parent, succ, succ_right);
                format!("deleted {key}; in-order successor {succ_key} took its place")
            }
            (only, None) | (None, only) => {
                let parent = path.last().copied();
                w.replace_child(parent, id, only);
                format!("deleted {key}")
            }
        };
        rec.push(StepKind::Delete, w.snapshot(Some(key)), narrative);

        // Unwind the whole path: deletion can unbalance several ancestors.
        for pos in (0..path.len()).rev() {
            let id = path[pos];
            w.update_height(id);
            let balance = w.balance(id);
            if !(-1..=1).contains(&balance) {
                let parent = if pos == 0 { None } else { Some(path[pos - 1]) };
                self.rebalance_delete(w, id, parent, key, balance, rec);
            }
        }
    }

    fn rebalance_delete(
        &self,
        w: &mut Working,
        id: NodeId,
        parent: Option<NodeId>,
        key: i64,
        balance: i32,
        rec: &mut Recorder<AvlSnapshot>,
    ) {
        let pivot_key = w.arena[id].key;
        if balance > 1 {
            let left = w.arena[id].left.expect("left-heavy node has a left child");
            let left_key = w.arena[left].key;
            if w.balance(left) < 0 {
                let new_left = w.rotate_left(left);
                w.arena[id].left = Some(new_left);
                rec.push(
                    StepKind::RotateLeft,
                    w.snapshot(Some(key)),
                    format!("left-right imbalance at {pivot_key}: rotating left around {left_key}"),
                );
            }
            let lifted = w.rotate_right(id);
            w.replace_child(parent, id, Some(lifted));
            rec.push(
                StepKind::RotateRight,
                w.snapshot(Some(key)),
                format!(
                    "rotating right around {pivot_key}; {} becomes the subtree root",
                    w.arena[lifted].key
                ),
            );
        } else {
            let right = w.arena[id].right.expect("right-heavy node has a right child");
            let right_key = w.arena[right].key;
            if w.balance(right) > 0 {
                let new_right = w.rotate_right(right);
                w.arena[id].right = Some(new_right);
                rec.push(
                    StepKind::RotateRight,
                    w.snapshot(Some(key)),
                    format!(
                        "right-left imbalance at {pivot_key}: rotating right around {right_key}"
                    ),
                );
            }
            let lifted = w.rotate_left(id);
            w.replace_child(parent, id, Some(lifted));
            rec.push(
                StepKind::RotateLeft,
                w.snapshot(Some(key)),
                format!(
                    "rotating left around {pivot_key}; {} becomes the subtree root",
                    w.arena[lifted].key
                ),
            );
        }
    }
}

impl TraceGenerator for AvlScript {
    type Snapshot = AvlSnapshot;

    fn name(&self) -> &'static str {
        "avl-tree"
    }

    fn validate(&self) -> Result<(), TraceError> {
        if self.ops.is_empty() {
            return Err(TraceError::EmptyInput {
                what: "operation script",
            });
        }
        Ok(())
    }

    fn record(&self, rec: &mut Recorder<AvlSnapshot>) {
        let mut w = Working::new();
        for (i, op) in self.ops.iter().enumerate() {
            w.op_index = i;
            match *op {
                AvlOp::Insert(key) => self.insert(&mut w, key, rec),
                AvlOp::Delete(key) => self.delete(&mut w, key, rec),
            }
        }
        let final_snapshot = w.snapshot(None);
        let keys = final_snapshot.in_order_keys().len();
        rec.push(
            StepKind::Complete,
            final_snapshot,
            format!("processed {} operations; tree holds {keys} keys", self.ops.len()),
        );
    }
}
