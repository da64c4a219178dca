//! k-d tree over a fixed point set.
//!
//! Splits on the axis of widest spread at the median, stores point
//! positions in leaves of at most `leaf_size`, and prunes a subtree when the
//! gap along the split axis already exceeds the worst kept candidate.

use tracing::debug;
use trust_core::models::{DistanceMetric, IndexKind, Neighbor, SelfMatch};
use trust_core::traits::NeighborIndex;

use crate::heap::KnnHeap;

/// Relative slack applied to the axis gap before pruning. Absorbs rounding in
/// the metric so pruning never drops a candidate the linear scan would keep.
const PRUNE_SLACK: f64 = 1e-12;

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        start: usize,
        end: usize,
    },
    Split {
        axis: usize,
        value: f32,
        left: usize,
        right: usize,
    },
}

/// Exact k-d tree. Results match `BruteForceIndex` including tie order.
#[derive(Debug, Clone)]
pub struct KdTree {
    points: Vec<Vec<f32>>,
    /// Point positions, permuted so every leaf owns a contiguous range.
    order: Vec<usize>,
    nodes: Vec<Node>,
    dimension: usize,
    metric: DistanceMetric,
}

impl KdTree {
    pub fn build(points: Vec<Vec<f32>>, metric: DistanceMetric, leaf_size: usize) -> Self {
        let leaf_size = leaf_size.max(1);
        let dimension = points.first().map(|p| p.len()).unwrap_or(0);
        let mut order: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::new();
        if !points.is_empty() {
            build_node(
                &points,
                &mut order,
                0,
                points.len(),
                dimension,
                leaf_size,
                &mut nodes,
            );
        }
        debug!(
            points = points.len(),
            nodes = nodes.len(),
            dimension,
            "built k-d tree"
        );
        Self {
            points,
            order,
            nodes,
            dimension,
            metric,
        }
    }

    /// Number of tree nodes, leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn search(&self, node: usize, query: &[f32], heap: &mut KnnHeap, self_match: SelfMatch) {
        match self.nodes[node] {
            Node::Leaf { start, end } => {
                for &i in &self.order[start..end] {
                    let d = self.metric.distance(query, &self.points[i]);
                    if self_match.admits(d) {
                        heap.push(i, d);
                    }
                }
            }
            Node::Split {
                axis,
                value,
                left,
                right,
            } => {
                let diff = query[axis] as f64 - value as f64;
                let (near, far) = if diff < 0.0 {
                    (left, right)
                } else {
                    (right, left)
                };
                self.search(near, query, heap, self_match);
                if diff.abs() * (1.0 - PRUNE_SLACK) <= heap.bound() {
                    self.search(far, query, heap, self_match);
                }
            }
        }
    }
}

/// Recursively partition `order[start..end]`, returning the node id.
fn build_node(
    points: &[Vec<f32>],
    order: &mut [usize],
    start: usize,
    end: usize,
    dimension: usize,
    leaf_size: usize,
    nodes: &mut Vec<Node>,
) -> usize {
    let id = nodes.len();
    nodes.push(Node::Leaf { start, end });
    if end - start <= leaf_size || dimension == 0 {
        return id;
    }

    let axis = widest_axis(points, &order[start..end], dimension);
    let mid = start + (end - start) / 2;
    order[start..end].select_nth_unstable_by(mid - start, |&a, &b| {
        points[a][axis]
            .total_cmp(&points[b][axis])
            .then(a.cmp(&b))
    });
    let value = points[order[mid]][axis];

    let left = build_node(points, order, start, mid, dimension, leaf_size, nodes);
    let right = build_node(points, order, mid, end, dimension, leaf_size, nodes);
    nodes[id] = Node::Split {
        axis,
        value,
        left,
        right,
    };
    id
}

/// Axis with the largest max-min spread; lowest axis on ties.
fn widest_axis(points: &[Vec<f32>], subset: &[usize], dimension: usize) -> usize {
    let mut best_axis = 0;
    let mut best_spread = f32::NEG_INFINITY;
    for axis in 0..dimension {
        let (lo, hi) = subset.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &i| {
            let v = points[i][axis];
            (lo.min(v), hi.max(v))
        });
        let spread = hi - lo;
        if spread > best_spread {
            best_spread = spread;
            best_axis = axis;
        }
    }
    best_axis
}

impl NeighborIndex for KdTree {
    fn k_nearest(&self, query: &[f32], k: usize, self_match: SelfMatch) -> Vec<Neighbor> {
        debug_assert!(self.points.is_empty() || query.len() == self.dimension);
        let mut heap = KnnHeap::new(k);
        if k > 0 && !self.nodes.is_empty() {
            self.search(0, query, &mut heap, self_match);
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
        IndexKind::KdTree
    }
}
