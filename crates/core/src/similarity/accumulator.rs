//! Streaming top-K selection used once per insertion.
//!
//! The new recipe is scored against every stored recipe and each score is
//! offered here. A K-bounded min-heap keeps the K best candidates seen so far
//! in O(N log K) total. Until the heap is full the vacant slots behave like
//! sentinels with an impossible negative score: any admissible candidate
//! takes one. Once full, a candidate must beat the current minimum strictly,
//! and among several candidates tied at the minimum the one offered earliest
//! is evicted first.

use crate::config::LinkThreshold;
use ordered_float::OrderedFloat;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Heap entry ordered by score, then by offer sequence (older first).
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    score: OrderedFloat<f64>,
    seq: u64,
    ordinal: u32,
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounded selection of the K highest-scoring ordinals.
#[derive(Debug)]
pub struct TopKAccumulator {
    k: usize,
    threshold: LinkThreshold,
    heap: BinaryHeap<Reverse<Slot>>,
    offered: u64,
}

impl TopKAccumulator {
    pub fn new(k: usize, threshold: LinkThreshold) -> Self {
        Self {
            k,
            threshold,
            heap: BinaryHeap::new(),
            offered: 0,
        }
    }

    /// Number of candidates currently held. Never exceeds K.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Smallest score currently held, or `None` while vacant slots remain.
    pub fn current_min(&self) -> Option<f64> {
        if self.heap.len() < self.k {
            None
        } else {
            self.heap.peek().map(|Reverse(slot)| slot.score.0)
        }
    }

    /// Offers a candidate. Returns `true` if it was admitted.
    pub fn offer(&mut self, ordinal: u32, score: f64) -> bool {
        let seq = self.offered;
        self.offered += 1;

        if self.k == 0 || score.is_nan() || !self.threshold.admits(score) {
            return false;
        }
        if let Some(min) = self.current_min() {
            if score <= min {
                return false;
            }
            self.heap.pop();
        }
        self.heap.push(Reverse(Slot {
            score: OrderedFloat(score),
            seq,
            ordinal,
        }));
        true
    }

    /// Consumes the accumulator, returning `(ordinal, score)` pairs ordered by
    /// descending score, ties in offer order.
    pub fn finish(self) -> Vec<(u32, f64)> {
        let mut slots: Vec<Slot> = self.heap.into_iter().map(|Reverse(s)| s).collect();
        slots.sort_unstable_by(|a, b| b.score.cmp(&a.score).then_with(|| a.seq.cmp(&b.seq)));
        slots.into_iter().map(|s| (s.ordinal, s.score.0)).collect()
    }
}
