//! One class's reference points and the index over them.

use std::fmt;

use trust_core::config::EstimatorConfig;
use trust_core::models::{ClassLabel, IndexKind, Neighbor, SelfMatch};
use trust_core::traits::NeighborIndex;
use trust_index::build_index;

/// Retained points of one class.
///
/// Points are kept in ascending source order, so position ties and source
/// index ties break the same way. Neighbors returned from here carry source
/// indices (positions in the `fit` input), not positions.
pub struct ClassIndex {
    label: ClassLabel,
    source_indices: Vec<usize>,
    index: Box<dyn NeighborIndex>,
}

impl ClassIndex {
    pub fn build(
        label: ClassLabel,
        points: Vec<Vec<f32>>,
        source_indices: Vec<usize>,
        config: &EstimatorConfig,
    ) -> Self {
        debug_assert_eq!(points.len(), source_indices.len());
        Self {
            label,
            source_indices,
            index: build_index(config.index, points, config.metric, config.leaf_size),
        }
    }

    pub fn label(&self) -> ClassLabel {
        self.label
    }

    pub fn len(&self) -> usize {
        self.source_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_indices.is_empty()
    }

    pub fn kind(&self) -> IndexKind {
        self.index.kind()
    }

    /// Source index of every retained point, ascending.
    pub fn source_indices(&self) -> &[usize] {
        &self.source_indices
    }

    /// Retained points in source order.
    pub fn points(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.index.len()).filter_map(move |i| self.index.point(i))
    }

    /// The k-th nearest retained point, or the farthest one when fewer than
    /// `k` survive `self_match`.
    pub fn kth_nearest(&self, query: &[f32], k: usize, self_match: SelfMatch) -> Option<Neighbor> {
        self.index
            .k_nearest(query, k, self_match)
            .last()
            .map(|n| self.to_source(*n))
    }

    pub fn nearest(&self, query: &[f32], self_match: SelfMatch) -> Option<Neighbor> {
        self.index
            .nearest(query, self_match)
            .map(|n| self.to_source(n))
    }

    fn to_source(&self, n: Neighbor) -> Neighbor {
        Neighbor {
            index: self.source_indices[n.index],
            distance: n.distance,
        }
    }
}

impl fmt::Debug for ClassIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassIndex")
            .field("label", &self.label)
            .field("points", &self.len())
            .field("kind", &self.kind())
            .finish()
    }
}
