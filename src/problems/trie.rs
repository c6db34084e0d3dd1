//! Trie insertion as a trace generator.
//!
//! Words are case-normalized and inserted one character at a time. Each
//! character either finds an existing child (`node-exists`) or creates one
//! (`create-node`); either way the word joins that node's passing-through
//! list. The terminal node is flagged end-of-word (`mark-end`), unless it
//! already was (`word-exists`: the insert is idempotent and changes no
//! structure).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::arena::{NodeArena, NodeId};
use crate::error::TraceError;
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// Trie insertion instance: the words to insert, in order.
#[derive(Debug, Clone)]
pub struct TrieInsert {
    words: Vec<String>,
}

/// One trie node in flattened snapshot form; child positions index into
/// [`TrieSnapshot::nodes`], sorted by character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieNodeSnapshot {
    /// The character keying this node; `None` for the root.
    pub ch: Option<char>,
    pub end_of_word: bool,
    /// Every inserted word whose path passes through this node.
    pub words: Vec<String>,
    pub children: Vec<(char, usize)>,
}

/// Rendering state for one insertion step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieSnapshot {
    pub nodes: Vec<TrieNodeSnapshot>,
    /// Position of the root in `nodes` (always 0).
    pub root: usize,
    /// Position of the node this step landed on.
    pub current: Option<usize>,
    /// The normalized word being inserted.
    pub current_word: Option<String>,
    /// Which word of the instance this step belongs to (0-based).
    pub word_index: usize,
}

#[derive(Debug, Clone)]
struct TrieNode {
    ch: Option<char>,
    end_of_word: bool,
    words: Vec<String>,
    children: BTreeMap<char, NodeId>,
}

impl TrieNode {
    fn new(ch: Option<char>) -> Self {
        Self {
            ch,
            end_of_word: false,
            words: Vec::new(),
            children: BTreeMap::new(),
        }
    }
}

impl TrieInsert {
    pub fn new(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    fn snapshot(
        &self,
        arena: &NodeArena<TrieNode>,
        root: NodeId,
        current: Option<NodeId>,
        current_word: Option<&str>,
        word_index: usize,
    ) -> TrieSnapshot {
        fn flatten(
            arena: &NodeArena<TrieNode>,
            at: NodeId,
            current: Option<NodeId>,
            out: &mut Vec<TrieNodeSnapshot>,
            current_pos: &mut Option<usize>,
        ) -> usize {
            let pos = out.len();
            if current == Some(at) {
                *current_pos = Some(pos);
            }
            let node = &arena[at];
            out.push(TrieNodeSnapshot {
                ch: node.ch,
                end_of_word: node.end_of_word,
                words: node.words.clone(),
                children: Vec::new(),
            });
            let children: Vec<(char, usize)> = node
                .children
                .iter()
                .map(|(&ch, &child)| (ch, flatten(arena, child, current, out, current_pos)))
                .collect();
            out[pos].children = children;
            pos
        }
        let mut nodes = Vec::new();
        let mut current_pos = None;
        let root = flatten(arena, root, current, &mut nodes, &mut current_pos);
        TrieSnapshot {
            nodes,
            root,
            current: current_pos,
            current_word: current_word.map(str::to_string),
            word_index,
        }
    }
}

impl TraceGenerator for TrieInsert {
    type Snapshot = TrieSnapshot;

    fn name(&self) -> &'static str {
        "trie-insert"
    }

    fn validate(&self) -> Result<(), TraceError> {
        if self.words.is_empty() {
            return Err(TraceError::EmptyInput { what: "word list" });
        }
        if self.words.iter().any(|w| w.is_empty()) {
            return Err(TraceError::EmptyInput { what: "word" });
        }
        Ok(())
    }

    fn record(&self, rec: &mut Recorder<TrieSnapshot>) {
        let mut arena: NodeArena<TrieNode> = NodeArena::new();
        let root = arena.alloc(TrieNode::new(None));

        for (word_index, raw) in self.words.iter().enumerate() {
            let word = raw.to_lowercase();
            let mut at = root;
            for ch in word.chars() {
                match arena[at].children.get(&ch).copied() {
                    Some(child) => {
                        arena[child].words.push(word.clone());
                        rec.push(
                            StepKind::NodeExists,
                            self.snapshot(&arena, root, Some(child), Some(&word), word_index),
                            format!("node '{ch}' already exists; advancing"),
                        );
                        at = child;
                    }
                    None => {
                        let child = arena.alloc(TrieNode::new(Some(ch)));
                        arena[child].words.push(word.clone());
                        arena[at].children.insert(ch, child);
                        rec.push(
                            StepKind::CreateNode,
                            self.snapshot(&arena, root, Some(child), Some(&word), word_index),
                            format!("created node '{ch}'"),
                        );
                        at = child;
                    }
                }
            }
            if arena[at].end_of_word {
                rec.push(
                    StepKind::WordExists,
                    self.snapshot(&arena, root, Some(at), Some(&word), word_index),
                    format!("\"{word}\" is already in the trie; nothing to change"),
                );
            } else {
                arena[at].end_of_word = true;
                rec.push(
                    StepKind::MarkEnd,
                    self.snapshot(&arena, root, Some(at), Some(&word), word_index),
                    format!("marked \"{word}\" as a complete word"),
                );
            }
        }

        let total_nodes = arena.len();
        rec.push(
            StepKind::Complete,
            self.snapshot(&arena, root, None, None, self.words.len().saturating_sub(1)),
            format!(
                "inserted {} words into a trie of {total_nodes} nodes",
                self.words.len()
            ),
        );
    }
}
