//! Property tests for trust-engine: scoring is deterministic, index-agnostic,
//! and alpha = 0 never drops a point.

use proptest::prelude::*;

use trust_core::config::EstimatorConfig;
use trust_core::models::{ExpectedClasses, FilterMode, IndexKind, Labels};
use trust_engine::TrustScoreEstimator;

/// Labeled 2-D integer grid points; every label in 0..3 appears at least once.
fn training_strategy() -> impl Strategy<Value = (Vec<Vec<f32>>, Vec<usize>)> {
    prop::collection::vec((prop::collection::vec(-6i8..6, 2), 0usize..3), 3..50).prop_map(
        |rows| {
            let mut x = Vec::with_capacity(rows.len() + 3);
            let mut y = Vec::with_capacity(rows.len() + 3);
            for label in 0..3 {
                x.push(vec![label as f32 * 10.0, 0.0]);
                y.push(label);
            }
            for (coords, label) in rows {
                x.push(coords.into_iter().map(f32::from).collect());
                y.push(label);
            }
            (x, y)
        },
    )
}

fn fit(config: EstimatorConfig, x: &[Vec<f32>], y: &[usize]) -> TrustScoreEstimator {
    let estimator = TrustScoreEstimator::new(config).unwrap();
    estimator
        .fit(x, &Labels::Integer(y.to_vec()), &ExpectedClasses::Observed)
        .unwrap();
    estimator
}

proptest! {
    #[test]
    fn prop_kd_tree_and_brute_force_agree(
        (x, y) in training_strategy(),
        k in 1usize..5,
        exclude in any::<bool>(),
    ) {
        let config = |index| EstimatorConfig {
            index,
            leaf_size: 2,
            exclude_self_match: exclude,
            ..Default::default()
        };
        let kd = fit(config(IndexKind::KdTree), &x, &y);
        let brute = fit(config(IndexKind::BruteForce), &x, &y);
        prop_assert_eq!(
            kd.score(&x, &y, Some(k)).unwrap(),
            brute.score(&x, &y, Some(k)).unwrap()
        );
    }

    #[test]
    fn prop_scoring_is_deterministic(
        (x, y) in training_strategy(),
        alpha in 0.0f64..0.9,
        density in any::<bool>(),
    ) {
        let config = EstimatorConfig {
            alpha,
            filtering: if density { FilterMode::Density } else { FilterMode::Uncertainty },
            filter_k: 3,
            ..Default::default()
        };
        let first = fit(config.clone(), &x, &y);
        let second = fit(config, &x, &y);
        prop_assert_eq!(first.class_sizes().unwrap(), second.class_sizes().unwrap());
        prop_assert_eq!(
            first.score(&x, &y, None).unwrap(),
            second.score(&x, &y, None).unwrap()
        );
    }

    #[test]
    fn prop_alpha_zero_keeps_class_counts(
        (x, y) in training_strategy(),
        density in any::<bool>(),
    ) {
        let config = EstimatorConfig {
            filtering: if density { FilterMode::Density } else { FilterMode::Uncertainty },
            ..Default::default()
        };
        let estimator = fit(config, &x, &y);
        let sizes = estimator.class_sizes().unwrap();
        for label in 0..3 {
            let expected = y.iter().filter(|&&l| l == label).count();
            prop_assert_eq!(sizes.get(&label).copied(), Some(expected));
        }
    }

    #[test]
    fn prop_trust_is_ratio_of_reported_distances(
        (x, y) in training_strategy(),
        query in prop::collection::vec(-8i8..8, 2),
        predicted in 0usize..3,
        k in 1usize..4,
    ) {
        let estimator = fit(EstimatorConfig::default(), &x, &y);
        let query: Vec<f32> = query.into_iter().map(f32::from).collect();
        let s = estimator.score_one(&query, predicted, Some(k)).unwrap();
        let epsilon = estimator.config().epsilon;
        prop_assert!(s.trust_score >= 0.0);
        prop_assert_eq!(
            s.trust_score,
            s.closest_other_distance / (s.predicted_distance + epsilon)
        );
        prop_assert!(s.closest_other_label != Some(predicted));
    }
}
