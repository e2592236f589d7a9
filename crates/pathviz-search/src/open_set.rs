//! Score-ordered open set.
//!
//! Entries live in a min-heap keyed by `(score, insertion_order)`: the
//! lowest score is popped first and ties go to the cell pushed earliest.
//! Lowering a cell's score pushes a fresh entry; the superseded one is
//! discarded lazily when it surfaces.

use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug)]
struct Entry {
    idx: usize,
    score: f64,
    // Monotonic; lower means pushed earlier.
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so the max-heap pops the smallest score, then oldest seq.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl OpenSet {
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    pub(crate) fn push(&mut self, idx: usize, score: f64) {
        self.heap.push(Entry {
            idx,
            score,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Pop the cheapest entry for which `live(idx, score)` holds, dropping
    /// stale entries on the way.
    pub(crate) fn pop_live(&mut self, mut live: impl FnMut(usize, f64) -> bool) -> Option<usize> {
        while let Some(e) = self.heap.pop() {
            if live(e.idx, e.score) {
                return Some(e.idx);
            }
        }
        None
    }

    /// Number of entries, stale ones included.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
