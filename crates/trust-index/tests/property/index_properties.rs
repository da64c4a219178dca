//! Property tests for trust-index: the k-d tree reproduces the linear scan.

use proptest::prelude::*;

use trust_core::models::{DistanceMetric, SelfMatch};
use trust_core::traits::NeighborIndex;
use trust_index::{BruteForceIndex, KdTree};

fn points_strategy() -> impl Strategy<Value = Vec<Vec<f32>>> {
    // Small integer grid coordinates force plenty of distance ties.
    prop::collection::vec(prop::collection::vec(-5i8..5, 3), 1..60).prop_map(|rows| {
        rows.into_iter()
            .map(|r| r.into_iter().map(f32::from).collect())
            .collect()
    })
}

fn metric_strategy() -> impl Strategy<Value = DistanceMetric> {
    prop_oneof![
        Just(DistanceMetric::Euclidean),
        Just(DistanceMetric::Manhattan),
        Just(DistanceMetric::Chebyshev),
    ]
}

proptest! {
    #[test]
    fn prop_kd_tree_matches_brute_force(
        points in points_strategy(),
        query in prop::collection::vec(-6i8..6, 3),
        k in 1usize..8,
        leaf_size in 1usize..6,
        metric in metric_strategy(),
        exclude in any::<bool>(),
    ) {
        let query: Vec<f32> = query.into_iter().map(f32::from).collect();
        let self_match = SelfMatch::from_exclude(exclude);
        let tree = KdTree::build(points.clone(), metric, leaf_size);
        let brute = BruteForceIndex::new(points, metric);

        let a = tree.k_nearest(&query, k, self_match);
        let b = brute.k_nearest(&query, k, self_match);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_results_sorted_and_bounded(
        points in points_strategy(),
        query in prop::collection::vec(-6i8..6, 3),
        k in 1usize..10,
    ) {
        let query: Vec<f32> = query.into_iter().map(f32::from).collect();
        let n = points.len();
        let tree = KdTree::build(points, DistanceMetric::Euclidean, 4);
        let out = tree.k_nearest(&query, k, SelfMatch::Allow);

        prop_assert_eq!(out.len(), k.min(n));
        for pair in out.windows(2) {
            prop_assert!(
                pair[0].distance < pair[1].distance
                    || (pair[0].distance == pair[1].distance && pair[0].index < pair[1].index)
            );
        }
    }
}
