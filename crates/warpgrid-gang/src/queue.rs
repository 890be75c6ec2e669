//! Ready queue ordered by [`GangAwareComparator`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::comparator::{GangAwareComparator, SortKey};
use crate::types::SchedulingUnit;

struct Entry {
    key: SortKey,
    /// Insertion sequence; keeps equal keys FIFO.
    seq: u64,
    unit: SchedulingUnit,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // `BinaryHeap` is a max-heap; reverse so the first-sorting unit is on top.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending units, extracted in gang-aware order.
///
/// Sort keys are computed once on push; a unit whose labels or priority
/// change must be popped and pushed again.
pub struct ReadyQueue {
    comparator: GangAwareComparator,
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl ReadyQueue {
    pub fn new(comparator: GangAwareComparator) -> Self {
        Self {
            comparator,
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, unit: SchedulingUnit) {
        let key = self.comparator.sort_key(&unit);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { key, seq, unit });
    }

    /// Remove and return the unit that sorts first.
    pub fn pop(&mut self) -> Option<SchedulingUnit> {
        self.heap.pop().map(|e| e.unit)
    }

    pub fn peek(&self) -> Option<&SchedulingUnit> {
        self.heap.peek().map(|e| &e.unit)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drain into extraction order.
    pub fn into_sorted_vec(mut self) -> Vec<SchedulingUnit> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(unit) = self.pop() {
            out.push(unit);
        }
        out
    }
}

impl Default for ReadyQueue {
    fn default() -> Self {
        Self::new(GangAwareComparator::default())
    }
}

impl Extend<SchedulingUnit> for ReadyQueue {
    fn extend<I: IntoIterator<Item = SchedulingUnit>>(&mut self, iter: I) {
        for unit in iter {
            self.push(unit);
        }
    }
}
