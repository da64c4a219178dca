//! Bounded max-heap collecting the k best candidates.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use trust_core::models::Neighbor;

/// Candidate ordered by (distance, index); the heap top is the worst kept.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    index: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.index.cmp(&other.index))
    }
}

/// Keeps the `k` smallest `(distance, index)` pairs seen so far.
#[derive(Debug)]
pub struct KnnHeap {
    k: usize,
    heap: BinaryHeap<Candidate>,
}

impl KnnHeap {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k + 1),
        }
    }

    /// Offer a candidate; it is kept if it beats the current worst.
    pub fn push(&mut self, index: usize, distance: f64) {
        if self.k == 0 {
            return;
        }
        let candidate = Candidate { distance, index };
        if self.heap.len() < self.k {
            self.heap.push(candidate);
        } else if let Some(top) = self.heap.peek() {
            if candidate < *top {
                self.heap.pop();
                self.heap.push(candidate);
            }
        }
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Distance of the worst kept candidate, or +inf while not full.
    pub fn bound(&self) -> f64 {
        if self.is_full() {
            self.heap.peek().map(|c| c.distance).unwrap_or(f64::INFINITY)
        } else {
            f64::INFINITY
        }
    }

    /// Kept candidates, best first.
    pub fn into_sorted(self) -> Vec<Neighbor> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor {
                index: c.index,
                distance: c.distance,
            })
            .collect()
    }
}
