//! Heap sort as a trace generator for the comparison-sort family.
//!
//! An in-place max-heap over a private working copy: build the heap by
//! sifting down from the last internal node, then repeatedly swap the
//! maximum to the shrinking sorted suffix. Every child selection and parent
//! check is a `compare` step, every exchange a `swap` step; the snapshot's
//! `heap_size` marks where the sorted region begins.

use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::step::StepKind;
use crate::traits::{Recorder, TraceGenerator};

/// Heap sort problem instance.
#[derive(Debug, Clone)]
pub struct HeapSort {
    values: Vec<i64>,
}

/// Rendering state for one sort step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapSortSnapshot {
    pub array: Vec<i64>,
    /// Indices below this bound form the heap; the suffix is sorted.
    pub heap_size: usize,
    /// The index pair compared in this step.
    pub comparing: Option<(usize, usize)>,
    /// The index pair exchanged in this step.
    pub swapped: Option<(usize, usize)>,
}

impl HeapSort {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    fn sift_down(
        &self,
        a: &mut [i64],
        mut root: usize,
        size: usize,
        rec: &mut Recorder<HeapSortSnapshot>,
    ) {
        loop {
            let left = 2 * root + 1;
            if left >= size {
                break;
            }
            let right = left + 1;
            let mut largest_child = left;
            if right < size {
                rec.push(
                    StepKind::Compare,
                    snapshot(a, size, Some((left, right)), None),
                    format!("comparing children {} and {}", a[left], a[right]),
                );
                if a[right] > a[left] {
                    largest_child = right;
                }
            }
            rec.push(
                StepKind::Compare,
                snapshot(a, size, Some((root, largest_child)), None),
                format!(
                    "comparing parent {} with larger child {}",
                    a[root], a[largest_child]
                ),
            );
            if a[largest_child] > a[root] {
                let (upper, lower) = (a[root], a[largest_child]);
                a.swap(root, largest_child);
                rec.push(
                    StepKind::Swap,
                    snapshot(a, size, None, Some((root, largest_child))),
                    format!("swapped {upper} down past {lower}"),
                );
                root = largest_child;
            } else {
                break;
            }
        }
    }
}

fn snapshot(
    a: &[i64],
    heap_size: usize,
    comparing: Option<(usize, usize)>,
    swapped: Option<(usize, usize)>,
) -> HeapSortSnapshot {
    HeapSortSnapshot {
        array: a.to_vec(),
        heap_size,
        comparing,
        swapped,
    }
}

impl TraceGenerator for HeapSort {
    type Snapshot = HeapSortSnapshot;

    fn name(&self) -> &'static str {
        "heap-sort"
    }

    fn validate(&self) -> Result<(), TraceError> {
        if self.values.is_empty() {
            return Err(TraceError::EmptyInput { what: "array" });
        }
        Ok(())
    }

    fn record(&self, rec: &mut Recorder<HeapSortSnapshot>) {
        let mut a = self.values.clone();
        let n = a.len();

        for i in (0..n / 2).rev() {
            self.sift_down(&mut a, i, n, rec);
        }

        for end in (1..n).rev() {
            let max = a[0];
            a.swap(0, end);
            rec.push(
                StepKind::Swap,
                snapshot(&a, end, None, Some((0, end))),
                format!("moved maximum {max} to its final position {end}"),
            );
            self.sift_down(&mut a, 0, end, rec);
        }

        rec.push(
            StepKind::Complete,
            snapshot(&a, 0, None, None),
            format!("array of {n} elements sorted"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TraceEngine;

    fn run(values: Vec<i64>) -> crate::Trace<HeapSortSnapshot> {
        TraceEngine::new(HeapSort::new(values)).run().unwrap()
    }

    #[test]
    fn sorts_the_array() {
        let trace = run(vec![5, 2, 9, 1, 7, 3]);
        assert_eq!(trace.outcome(), Some(StepKind::Complete));
        assert_eq!(
            trace.last().unwrap().snapshot.array,
            vec![1, 2, 3, 5, 7, 9]
        );
    }

    #[test]
    fn sorted_region_only_grows() {
        let trace = run(vec![4, 1, 3, 2]);
        let mut previous = usize::MAX;
        for step in trace.iter().filter(|s| s.kind == StepKind::Swap) {
            if step.snapshot.swapped.map_or(false, |(a, _)| a == 0) {
                assert!(step.snapshot.heap_size <= previous);
                previous = step.snapshot.heap_size;
            }
        }
    }

    #[test]
    fn already_sorted_input_still_compares() {
        let trace = run(vec![1, 2, 3]);
        assert!(trace.iter().any(|s| s.kind == StepKind::Compare));
        assert_eq!(trace.last().unwrap().snapshot.array, vec![1, 2, 3]);
    }

    #[test]
    fn duplicates_survive_sorting() {
        let trace = run(vec![3, 1, 3, 1]);
        assert_eq!(trace.last().unwrap().snapshot.array, vec![1, 1, 3, 3]);
    }

    #[test]
    fn single_element_completes_without_swaps() {
        let trace = run(vec![42]);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.outcome(), Some(StepKind::Complete));
    }

    #[test]
    fn empty_array_rejected() {
        let err = TraceEngine::new(HeapSort::new(vec![])).run().unwrap_err();
        assert_eq!(err, TraceError::EmptyInput { what: "array" });
    }
}
