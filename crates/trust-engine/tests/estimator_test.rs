use std::collections::BTreeSet;

use test_fixtures::synthetic::gaussian_clusters;
use trust_core::config::EstimatorConfig;
use trust_core::models::{ExpectedClasses, IndexKind, Labels};
use trust_core::TrustError;
use trust_engine::TrustScoreEstimator;

fn separable() -> (Vec<Vec<f32>>, Vec<usize>) {
    let data = gaussian_clusters(&[vec![0.0, 0.0], vec![10.0, 10.0]], 50, 0.5, 42);
    (data.embeddings, data.labels)
}

fn fitted(config: EstimatorConfig) -> (TrustScoreEstimator, Vec<Vec<f32>>, Vec<usize>) {
    let (x, y) = separable();
    let estimator = TrustScoreEstimator::new(config).unwrap();
    estimator
        .fit(&x, &Labels::Integer(y.clone()), &ExpectedClasses::Observed)
        .unwrap();
    (estimator, x, y)
}

// --- fit ---

#[test]
fn alpha_zero_retains_every_point() {
    let (estimator, _, _) = fitted(EstimatorConfig::default());
    let sizes = estimator.class_sizes().unwrap();
    assert_eq!(sizes.get(&0), Some(&50));
    assert_eq!(sizes.get(&1), Some(&50));
}

#[test]
fn fit_rejects_label_length_mismatch() {
    let estimator = TrustScoreEstimator::default();
    let x = vec![vec![0.0, 0.0]; 5];
    let err = estimator
        .fit(&x, &Labels::Integer(vec![0, 0, 1, 1]), &ExpectedClasses::Observed)
        .unwrap_err();
    assert!(matches!(err, TrustError::InvalidInput { .. }));
    assert!(!estimator.is_fitted());
}

#[test]
fn fit_rejects_ragged_embeddings() {
    let estimator = TrustScoreEstimator::default();
    let x = vec![vec![0.0, 0.0], vec![1.0]];
    let err = estimator
        .fit(&x, &Labels::Integer(vec![0, 1]), &ExpectedClasses::Observed)
        .unwrap_err();
    assert!(matches!(err, TrustError::InvalidInput { .. }));
}

#[test]
fn fit_rejects_non_finite_embeddings() {
    let estimator = TrustScoreEstimator::default();
    let x = vec![vec![0.0, f32::NAN], vec![1.0, 1.0]];
    assert!(estimator
        .fit(&x, &Labels::Integer(vec![0, 1]), &ExpectedClasses::Observed)
        .is_err());
}

#[test]
fn fit_rejects_expected_class_without_points() {
    let estimator = TrustScoreEstimator::default();
    let x = vec![vec![0.0], vec![1.0], vec![2.0]];
    let err = estimator
        .fit(&x, &Labels::Integer(vec![0, 2, 2]), &ExpectedClasses::Count(3))
        .unwrap_err();
    assert!(err.to_string().contains("class 1"));
}

#[test]
fn fit_rejects_more_expected_classes_than_points() {
    let estimator = TrustScoreEstimator::default();
    let x = vec![vec![0.0], vec![1.0]];
    let err = estimator
        .fit(
            &x,
            &Labels::Integer(vec![0, 1]),
            &ExpectedClasses::Count(usize::MAX),
        )
        .unwrap_err();
    assert!(matches!(err, TrustError::InvalidInput { .. }));
    assert!(!estimator.is_fitted());
}

#[test]
fn fit_rejects_label_outside_expected_set() {
    let estimator = TrustScoreEstimator::default();
    let x = vec![vec![0.0], vec![1.0]];
    let err = estimator
        .fit(
            &x,
            &Labels::Integer(vec![0, 5]),
            &ExpectedClasses::Labels(BTreeSet::from([0, 1])),
        )
        .unwrap_err();
    assert!(matches!(err, TrustError::InvalidInput { .. }));
}

#[test]
fn one_hot_labels_fit_like_integer_labels() {
    let (x, y) = separable();
    let one_hot: Vec<Vec<f32>> = y
        .iter()
        .map(|&l| {
            let mut row = vec![0.0; 2];
            row[l] = 1.0;
            row
        })
        .collect();

    let a = TrustScoreEstimator::default();
    a.fit(&x, &Labels::Integer(y.clone()), &ExpectedClasses::Observed)
        .unwrap();
    let b = TrustScoreEstimator::default();
    b.fit(&x, &Labels::OneHot(one_hot), &ExpectedClasses::Count(2))
        .unwrap();

    let queries = vec![vec![0.3, 0.1], vec![9.0, 9.5]];
    assert_eq!(
        a.score(&queries, &[0, 1], None).unwrap(),
        b.score(&queries, &[0, 1], None).unwrap()
    );
}

#[test]
fn refit_replaces_previous_classes() {
    let (estimator, _, _) = fitted(EstimatorConfig::default());
    let x = vec![vec![0.0, 0.0], vec![5.0, 5.0]];
    estimator
        .fit(&x, &Labels::Integer(vec![7, 8]), &ExpectedClasses::Observed)
        .unwrap();
    assert_eq!(estimator.class_labels().unwrap(), vec![7, 8]);
    let err = estimator.score(&[vec![0.0, 0.0]], &[0], None).unwrap_err();
    assert!(matches!(err, TrustError::UnknownLabel { label: 0 }));
}

#[test]
fn failed_refit_keeps_previous_state() {
    let (estimator, _, _) = fitted(EstimatorConfig::default());
    let before = estimator.score(&[vec![0.1, 0.1]], &[0], None).unwrap();
    let err = estimator
        .fit(&[vec![1.0]], &Labels::Integer(vec![]), &ExpectedClasses::Observed)
        .unwrap_err();
    assert!(matches!(err, TrustError::InvalidInput { .. }));
    let after = estimator.score(&[vec![0.1, 0.1]], &[0], None).unwrap();
    assert_eq!(before, after);
    assert_eq!(estimator.dimension().unwrap(), 2);
}

// --- score ---

#[test]
fn score_before_fit_is_unfitted_error() {
    let estimator = TrustScoreEstimator::default();
    let err = estimator.score(&[vec![0.0]], &[0], None).unwrap_err();
    assert!(matches!(err, TrustError::UnfittedEstimator));
}

#[test]
fn score_rejects_unseen_predicted_label() {
    let (estimator, _, _) = fitted(EstimatorConfig::default());
    let err = estimator
        .score(&[vec![0.0, 0.0], vec![1.0, 1.0]], &[0, 9], None)
        .unwrap_err();
    assert!(matches!(err, TrustError::UnknownLabel { label: 9 }));
}

#[test]
fn score_rejects_wrong_query_width() {
    let (estimator, _, _) = fitted(EstimatorConfig::default());
    let err = estimator.score(&[vec![0.0, 0.0, 0.0]], &[0], None).unwrap_err();
    assert!(matches!(
        err,
        TrustError::DimensionMismatch {
            expected: 2,
            actual: 3
        }
    ));
}

#[test]
fn score_rejects_length_mismatch_and_zero_k() {
    let (estimator, _, _) = fitted(EstimatorConfig::default());
    assert!(matches!(
        estimator.score(&[vec![0.0, 0.0]], &[0, 1], None),
        Err(TrustError::InvalidInput { .. })
    ));
    assert!(matches!(
        estimator.score(&[vec![0.0, 0.0]], &[0], Some(0)),
        Err(TrustError::InvalidInput { .. })
    ));
}

#[test]
fn empty_query_batch_scores_to_empty_output() {
    let (estimator, _, _) = fitted(EstimatorConfig::default());
    let out = estimator.score(&[], &[], None).unwrap();
    assert!(out.is_empty());
}

#[test]
fn score_is_deterministic() {
    let (estimator, x, y) = fitted(EstimatorConfig::default());
    let a = estimator.score(&x, &y, Some(3)).unwrap();
    let b = estimator.score(&x, &y, Some(3)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn coincident_query_does_not_divide_by_zero() {
    let (estimator, x, y) = fitted(EstimatorConfig::default());
    let s = estimator.score_one(&x[0], y[0], Some(1)).unwrap();
    assert_eq!(s.predicted_distance, 0.0);
    assert_eq!(s.predicted_neighbor_index, Some(0));
    assert!(s.trust_score.is_finite());
    assert!(s.trust_score > 1e10);
}

#[test]
fn correct_predictions_on_separable_data_score_well_above_one() {
    let (estimator, _, _) = fitted(EstimatorConfig::default());
    let queries = vec![vec![0.2, -0.1], vec![-0.3, 0.4], vec![10.1, 9.8], vec![9.7, 10.2]];
    let out = estimator.score(&queries, &[0, 0, 1, 1], None).unwrap();
    for (i, t) in out.trust_scores.iter().enumerate() {
        assert!(*t > 5.0, "query {i} scored {t}");
    }
    assert_eq!(out.closest_other_labels, vec![Some(1), Some(1), Some(0), Some(0)]);
}

#[test]
fn wrong_predictions_on_separable_data_score_below_one() {
    let (estimator, _, _) = fitted(EstimatorConfig::default());
    let out = estimator
        .score(&[vec![0.0, 0.0], vec![10.0, 10.0]], &[1, 0], None)
        .unwrap();
    assert!(out.trust_scores.iter().all(|t| *t < 0.2));
}

#[test]
fn neighbor_indices_point_back_into_fit_input() {
    let (estimator, x, _) = fitted(EstimatorConfig::default());
    let query = vec![9.9, 10.05];
    let s = estimator.score_one(&query, 1, None).unwrap();
    let same = &x[s.predicted_neighbor_index.unwrap()];
    let other = &x[s.closest_other_neighbor_index.unwrap()];
    let d = |p: &Vec<f32>| {
        p.iter()
            .zip(&query)
            .map(|(a, b)| ((*a as f64) - (*b as f64)).powi(2))
            .sum::<f64>()
            .sqrt()
    };
    assert!((d(same) - s.predicted_distance).abs() < 1e-9);
    assert!((d(other) - s.closest_other_distance).abs() < 1e-9);
}

#[test]
fn explicit_k_overrides_configured_score_k() {
    let config = EstimatorConfig {
        score_k: 1,
        ..Default::default()
    };
    let x = vec![vec![0.0], vec![1.0], vec![3.0], vec![20.0]];
    let estimator = TrustScoreEstimator::new(config).unwrap();
    estimator
        .fit(&x, &Labels::Integer(vec![0, 0, 0, 1]), &ExpectedClasses::Observed)
        .unwrap();
    let k1 = estimator.score_one(&[0.0], 0, None).unwrap();
    let k3 = estimator.score_one(&[0.0], 0, Some(3)).unwrap();
    assert_eq!(k1.predicted_distance, 0.0);
    assert_eq!(k3.predicted_distance, 3.0);
    assert_eq!(k3.predicted_neighbor_index, Some(2));
    // k larger than the class falls back to the farthest point.
    let k9 = estimator.score_one(&[0.0], 0, Some(9)).unwrap();
    assert_eq!(k9.predicted_distance, 3.0);
}

#[test]
fn other_class_ties_go_to_lowest_label() {
    let x = vec![vec![0.0], vec![-1.0], vec![1.0], vec![5.0]];
    let estimator = TrustScoreEstimator::default();
    estimator
        .fit(&x, &Labels::Integer(vec![3, 2, 1, 0]), &ExpectedClasses::Observed)
        .unwrap();
    // Classes 1 and 2 are both at distance 1 from the origin.
    let s = estimator.score_one(&[0.0], 3, None).unwrap();
    assert_eq!(s.closest_other_label, Some(1));
    assert_eq!(s.closest_other_neighbor_index, Some(2));
}

#[test]
fn single_class_yields_infinite_trust() {
    let estimator = TrustScoreEstimator::default();
    estimator
        .fit(
            &[vec![0.0], vec![1.0]],
            &Labels::Integer(vec![4, 4]),
            &ExpectedClasses::Observed,
        )
        .unwrap();
    let s = estimator.score_one(&[0.5], 4, None).unwrap();
    assert!(s.trust_score.is_infinite());
    assert_eq!(s.closest_other_label, None);
    assert_eq!(s.closest_other_neighbor_index, None);
}

#[test]
fn excluded_self_match_uses_next_distinct_point() {
    let config = EstimatorConfig {
        exclude_self_match: true,
        ..Default::default()
    };
    let (estimator, x, y) = fitted(config);
    let s = estimator.score_one(&x[0], y[0], Some(1)).unwrap();
    assert!(s.predicted_distance > 0.0);
    assert_ne!(s.predicted_neighbor_index, Some(0));
    assert!(s.trust_score.is_finite() && s.trust_score > 1.0);
}

#[test]
fn excluded_self_match_with_only_coincident_points_scores_zero() {
    let config = EstimatorConfig {
        exclude_self_match: true,
        ..Default::default()
    };
    let estimator = TrustScoreEstimator::new(config).unwrap();
    estimator
        .fit(
            &[vec![1.0], vec![1.0], vec![4.0]],
            &Labels::Integer(vec![0, 0, 1]),
            &ExpectedClasses::Observed,
        )
        .unwrap();
    let s = estimator.score_one(&[1.0], 0, None).unwrap();
    assert_eq!(s.predicted_neighbor_index, None);
    assert_eq!(s.trust_score, 0.0);
    assert_eq!(s.closest_other_distance, 3.0);
}

#[test]
fn kd_tree_and_brute_force_produce_identical_scores() {
    let data = gaussian_clusters(
        &[vec![0.0; 6], vec![2.0; 6], vec![4.0; 6]],
        80,
        1.2,
        5,
    );
    let queries = gaussian_clusters(&[vec![1.0; 6], vec![3.0; 6]], 30, 1.5, 6);
    let predicted: Vec<usize> = queries.labels.iter().map(|l| l * 2).collect();

    let mut outputs = Vec::new();
    for index in [IndexKind::KdTree, IndexKind::BruteForce] {
        let estimator = TrustScoreEstimator::new(EstimatorConfig {
            index,
            leaf_size: 4,
            ..Default::default()
        })
        .unwrap();
        estimator
            .fit(
                &data.embeddings,
                &Labels::Integer(data.labels.clone()),
                &ExpectedClasses::Observed,
            )
            .unwrap();
        outputs.push(estimator.score(&queries.embeddings, &predicted, Some(4)).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn class_points_expose_retained_sources() {
    let (estimator, x, _) = fitted(EstimatorConfig::default());
    let class = estimator.class_points(1).unwrap();
    assert_eq!(class.label, 1);
    assert_eq!(class.source_indices, (50..100).collect::<Vec<_>>());
    assert_eq!(class.points[0], x[50]);
    assert!(matches!(
        estimator.class_points(3),
        Err(TrustError::UnknownLabel { label: 3 })
    ));
}
