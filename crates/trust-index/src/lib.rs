//! # trust-index
//!
//! Exact nearest-neighbor indexes over a fixed point set.
//! Both implementations order results by distance, then by position, so
//! swapping one for the other never changes a score.

pub mod brute_force;
pub mod heap;
pub mod kd_tree;

pub use brute_force::BruteForceIndex;
pub use kd_tree::KdTree;

use trust_core::models::{DistanceMetric, IndexKind};
use trust_core::traits::NeighborIndex;

/// Build an index of the requested kind over `points`.
pub fn build_index(
    kind: IndexKind,
    points: Vec<Vec<f32>>,
    metric: DistanceMetric,
    leaf_size: usize,
) -> Box<dyn NeighborIndex> {
    match kind {
        IndexKind::KdTree => Box::new(KdTree::build(points, metric, leaf_size)),
        IndexKind::BruteForce => Box::new(BruteForceIndex::new(points, metric)),
    }
}
