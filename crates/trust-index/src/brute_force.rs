//! Linear-scan index. The reference behavior the k-d tree must reproduce.

use trust_core::models::{DistanceMetric, IndexKind, Neighbor, SelfMatch};
use trust_core::traits::NeighborIndex;

use crate::heap::KnnHeap;

/// Scans every stored point per query.
#[derive(Debug, Clone)]
pub struct BruteForceIndex {
    points: Vec<Vec<f32>>,
    dimension: usize,
    metric: DistanceMetric,
}

impl BruteForceIndex {
    pub fn new(points: Vec<Vec<f32>>, metric: DistanceMetric) -> Self {
        let dimension = points.first().map(|p| p.len()).unwrap_or(0);
        Self {
            points,
            dimension,
            metric,
        }
    }
}

impl NeighborIndex for BruteForceIndex {
    fn k_nearest(&self, query: &[f32], k: usize, self_match: SelfMatch) -> Vec<Neighbor> {
        debug_assert!(self.points.is_empty() || query.len() == self.dimension);
        let mut heap = KnnHeap::new(k);
        for (i, p) in self.points.iter().enumerate() {
            let d = self.metric.distance(query, p);
            if self_match.admits(d) {
                heap.push(i, d);
            }
        }
        heap.into_sorted()
    }

    fn point(&self, index: usize) -> Option<&[f32]> {
        self.points.get(index).map(Vec::as_slice)
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn metric(&self) -> DistanceMetric {
        self.metric
    }

    fn kind(&self) -> IndexKind {
        IndexKind::BruteForce
    }
}
