//! Uncertainty filter: confidence of an auxiliary classifier in each
//! reference point's own label.

use std::collections::BTreeMap;

use rayon::prelude::*;
use trust_core::config::EstimatorConfig;
use trust_core::errors::{TrustError, TrustResult};
use trust_core::models::{ClassLabel, SelfMatch};
use trust_core::traits::{AuxiliaryClassifier, NeighborIndex};
use trust_index::build_index;

/// Uniform-weight k-NN vote over the full training set.
///
/// Used when uncertainty filtering is requested without a caller-supplied
/// classifier. A training point votes for itself, matching a k-NN classifier
/// fitted and evaluated on the same data. Vote columns follow the distinct
/// training labels in ascending order.
pub struct KnnVoteClassifier {
    index: Box<dyn NeighborIndex>,
    classes: Vec<ClassLabel>,
    /// Vote column of each training point.
    columns: Vec<usize>,
    k: usize,
}

impl KnnVoteClassifier {
    pub fn fit(embeddings: &[Vec<f32>], labels: &[ClassLabel], config: &EstimatorConfig) -> Self {
        let positions = column_positions(labels.iter().copied());
        let columns = labels.iter().map(|l| positions[l]).collect();
        Self {
            index: build_index(
                config.index,
                embeddings.to_vec(),
                config.metric,
                config.leaf_size,
            ),
            classes: positions.into_keys().collect(),
            columns,
            k: config.filter_k,
        }
    }
}

impl AuxiliaryClassifier for KnnVoteClassifier {
    fn predict_proba(&self, embeddings: &[Vec<f32>]) -> TrustResult<Vec<Vec<f64>>> {
        let dimension = self.index.dimension();
        embeddings
            .par_iter()
            .map(|e| {
                if e.len() != dimension {
                    return Err(TrustError::DimensionMismatch {
                        expected: dimension,
                        actual: e.len(),
                    });
                }
                let neighbors = self.index.k_nearest(e, self.k, SelfMatch::Allow);
                let mut votes = vec![0.0; self.classes.len()];
                for n in &neighbors {
                    votes[self.columns[n.index]] += 1.0;
                }
                let total = neighbors.len() as f64;
                if total > 0.0 {
                    for v in &mut votes {
                        *v /= total;
                    }
                }
                Ok(votes)
            })
            .collect()
    }

    fn classes(&self) -> Option<&[ClassLabel]> {
        Some(&self.classes)
    }

    fn name(&self) -> &str {
        "knn_vote"
    }
}

/// Dense column of each distinct label, in ascending label order.
fn column_positions(labels: impl Iterator<Item = ClassLabel>) -> BTreeMap<ClassLabel, usize> {
    let mut positions: BTreeMap<ClassLabel, usize> = labels.map(|l| (l, 0)).collect();
    for (column, slot) in positions.values_mut().enumerate() {
        *slot = column;
    }
    positions
}

/// Probability `classifier` assigns to each point's own label.
///
/// A label absent from the classifier's columns gets zero.
///
/// # Errors
/// `Classifier` if the classifier returns the wrong number of rows or a
/// probability outside `[0, 1]`.
pub fn label_confidence(
    classifier: &dyn AuxiliaryClassifier,
    embeddings: &[Vec<f32>],
    labels: &[ClassLabel],
) -> TrustResult<Vec<f64>> {
    let proba = classifier.predict_proba(embeddings)?;
    if proba.len() != labels.len() {
        return Err(TrustError::Classifier {
            reason: format!(
                "{} returned {} rows for {} points",
                classifier.name(),
                proba.len(),
                labels.len()
            ),
        });
    }
    let columns: Option<BTreeMap<ClassLabel, usize>> = classifier.classes().map(|classes| {
        classes
            .iter()
            .enumerate()
            .map(|(column, &label)| (label, column))
            .collect()
    });
    proba
        .iter()
        .zip(labels)
        .map(|(row, &label)| {
            let column = match &columns {
                Some(columns) => columns.get(&label).copied(),
                None => Some(label),
            };
            let p = column.and_then(|c| row.get(c)).copied().unwrap_or(0.0);
            if !(0.0..=1.0).contains(&p) {
                return Err(TrustError::Classifier {
                    reason: format!("{} returned probability {p}", classifier.name()),
                });
            }
            Ok(p)
        })
        .collect()
}
