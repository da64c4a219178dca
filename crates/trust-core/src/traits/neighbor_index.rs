use crate::models::{DistanceMetric, IndexKind, Neighbor, SelfMatch};

/// A read-only nearest-neighbor index over a fixed point set.
pub trait NeighborIndex: Send + Sync {
    /// Up to `k` nearest stored points, sorted by distance ascending and
    /// then by position ascending.
    fn k_nearest(&self, query: &[f32], k: usize, self_match: SelfMatch) -> Vec<Neighbor>;

    /// The nearest stored point, if any survives `self_match`.
    fn nearest(&self, query: &[f32], self_match: SelfMatch) -> Option<Neighbor> {
        self.k_nearest(query, 1, self_match).into_iter().next()
    }

    /// The stored point at `index`.
    fn point(&self, index: usize) -> Option<&[f32]>;

    /// Number of stored points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of every stored point.
    fn dimension(&self) -> usize;

    fn metric(&self) -> DistanceMetric;

    fn kind(&self) -> IndexKind;
}
