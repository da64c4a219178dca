//! Density filter: distance to the k-th nearest other point of the same class.

use rayon::prelude::*;
use trust_core::config::EstimatorConfig;
use trust_core::models::SelfMatch;
use trust_index::build_index;

/// Per point, the distance to its `filter_k`-th nearest other point in
/// `points`, or to the farthest one when the class is smaller than that.
///
/// The point itself is always among its own neighbors at distance zero, so
/// the k-th other neighbor is the (k+1)-th neighbor overall. This holds even
/// with duplicate points.
pub fn knn_radii(points: &[Vec<f32>], config: &EstimatorConfig) -> Vec<f64> {
    let n = points.len();
    if n <= 1 {
        return vec![0.0; n];
    }
    let index = build_index(config.index, points.to_vec(), config.metric, config.leaf_size);
    let k = (config.filter_k + 1).min(n);
    points
        .par_iter()
        .map(|p| {
            index
                .k_nearest(p, k, SelfMatch::Allow)
                .last()
                .map(|nb| nb.distance)
                .unwrap_or(0.0)
        })
        .collect()
}
