//! FIFO queue simulation as a trace generator.
//!
//! The instance is a script of enqueue/dequeue operations. Each operation is
//! one step carrying the full queue contents; dequeueing an empty queue is
//! an `underflow` step, never an error.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// One scripted queue operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "op", content = "value")]
pub enum QueueOp {
    Enqueue(i64),
    Dequeue,
}

/// Queue simulation instance.
#[derive(Debug, Clone)]
pub struct QueueSim {
    ops: Vec<QueueOp>,
}

/// Rendering state for one queue step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Queue contents, front first.
    pub queue: Vec<i64>,
    pub front: Option<i64>,
    pub rear: Option<i64>,
    /// The value this operation moved, if any.
    pub moved: Option<i64>,
    /// Which script operation this step belongs to (0-based).
    pub op_index: usize,
}

impl QueueSim {
    pub fn new(ops: Vec<QueueOp>) -> Self {
        Self { ops }
    }

    pub fn ops(&self) -> &[QueueOp] {
        &self.ops
    }
}

fn snapshot(queue: &VecDeque<i64>, moved: Option<i64>, op_index: usize) -> QueueSnapshot {
    QueueSnapshot {
        queue: queue.iter().copied().collect(),
        front: queue.front().copied(),
        rear: queue.back().copied(),
        moved,
        op_index,
    }
}

impl TraceGenerator for QueueSim {
    type Snapshot = QueueSnapshot;

    fn name(&self) -> &'static str {
        "queue-sim"
    }

    fn validate(&self) -> Result<(), TraceError> {
        if self.ops.is_empty() {
            return Err(TraceError::EmptyInput {
                what: "operation script",
            });
        }
        Ok(())
    }

    fn record(&self, rec: &mut Recorder<QueueSnapshot>) {
        let mut queue: VecDeque<i64> = VecDeque::new();
        for (op_index, op) in self.ops.iter().enumerate() {
            match *op {
                QueueOp::Enqueue(value) => {
                    queue.push_back(value);
                    rec.push(
                        StepKind::Enqueue,
                        snapshot(&queue, Some(value), op_index),
                        format!("enqueued {value} at the rear"),
                    );
                }
                QueueOp::Dequeue => match queue.pop_front() {
                    Some(value) => rec.push(
                        StepKind::Dequeue,
                        snapshot(&queue, Some(value), op_index),
                        format!("dequeued {value} from the front"),
                    ),
                    None => rec.push(
                        StepKind::Underflow,
                        snapshot(&queue, None, op_index),
                        "queue is empty; dequeue has no effect",
                    ),
                },
            }
        }
        rec.push(
            StepKind::Complete,
            snapshot(&queue, None, self.ops.len().saturating_sub(1)),
            format!(
                "processed {} operations; {} elements remain",
                self.ops.len(),
                queue.len()
            ),
        );
    }
}
