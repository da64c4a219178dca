//! Immutable result of a successful `fit`.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::info;
use trust_core::config::EstimatorConfig;
use trust_core::errors::{TrustError, TrustResult};
use trust_core::models::{ClassLabel, ExpectedClasses, FilterMode, Labels};
use trust_core::traits::AuxiliaryClassifier;

use crate::class_index::ClassIndex;
use crate::filtering::{self, ClassPoints, KnnVoteClassifier};

/// Per-class indexes plus the configuration they were built with.
///
/// Classes are keyed in ascending label order.
#[derive(Debug)]
pub struct FittedState {
    classes: BTreeMap<ClassLabel, ClassIndex>,
    dimension: usize,
    config: EstimatorConfig,
}

impl FittedState {
    /// Validate the training data, filter each class, and index it.
    pub fn build(
        embeddings: &[Vec<f32>],
        labels: &Labels,
        expected: &ExpectedClasses,
        config: &EstimatorConfig,
        auxiliary: Option<&dyn AuxiliaryClassifier>,
    ) -> TrustResult<Self> {
        let dimension = validate_embeddings(embeddings)?;
        if labels.len() != embeddings.len() {
            return Err(TrustError::invalid(format!(
                "labels has length {} but embeddings has length {}",
                labels.len(),
                embeddings.len()
            )));
        }
        let decoded = labels.decode()?;
        let class_set = expected.resolve(&decoded)?;

        let mut grouped: BTreeMap<ClassLabel, ClassPoints> = class_set
            .iter()
            .map(|&label| (label, ClassPoints::default()))
            .collect();
        for (source, (embedding, label)) in embeddings.iter().zip(&decoded).enumerate() {
            if let Some(class) = grouped.get_mut(label) {
                class.points.push(embedding.clone());
                class.source_indices.push(source);
            }
        }
        if let Some((label, _)) = grouped.iter().find(|(_, c)| c.is_empty()) {
            return Err(TrustError::invalid(format!(
                "class {label} has no training points"
            )));
        }

        let confidence = if config.filters() && config.filtering == FilterMode::Uncertainty {
            Some(match auxiliary {
                Some(classifier) => filtering::label_confidence(classifier, embeddings, &decoded)?,
                None => {
                    let knn = KnnVoteClassifier::fit(embeddings, &decoded, config);
                    filtering::label_confidence(&knn, embeddings, &decoded)?
                }
            })
        } else {
            None
        };

        let classes = grouped
            .into_par_iter()
            .map(|(label, class)| {
                let retained =
                    filtering::filter_class(label, class, config, confidence.as_deref())?;
                if retained.is_empty() {
                    return Err(TrustError::invalid(format!(
                        "class {label} is empty after filtering"
                    )));
                }
                let index =
                    ClassIndex::build(label, retained.points, retained.source_indices, config);
                Ok((label, index))
            })
            .collect::<TrustResult<BTreeMap<ClassLabel, ClassIndex>>>()?;

        let retained: usize = classes.values().map(ClassIndex::len).sum();
        info!(
            classes = classes.len(),
            retained,
            discarded = embeddings.len() - retained,
            filtering = config.filtering.name(),
            "fitted trust score estimator"
        );

        Ok(Self {
            classes,
            dimension,
            config: config.clone(),
        })
    }

    /// Assemble a state from prebuilt class indexes.
    pub(crate) fn from_parts(
        classes: BTreeMap<ClassLabel, ClassIndex>,
        dimension: usize,
        config: EstimatorConfig,
    ) -> Self {
        Self {
            classes,
            dimension,
            config,
        }
    }

    pub fn class(&self, label: ClassLabel) -> Option<&ClassIndex> {
        self.classes.get(&label)
    }

    pub fn classes(&self) -> &BTreeMap<ClassLabel, ClassIndex> {
        &self.classes
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Total retained points across classes.
    pub fn retained_points(&self) -> usize {
        self.classes.values().map(ClassIndex::len).sum()
    }
}

/// Check a batch of embeddings is non-empty, uniform in width, and finite.
/// Returns the shared width.
pub fn validate_embeddings(embeddings: &[Vec<f32>]) -> TrustResult<usize> {
    let first = embeddings
        .first()
        .ok_or_else(|| TrustError::invalid("embeddings must not be empty"))?;
    let dimension = first.len();
    if dimension == 0 {
        return Err(TrustError::invalid("embeddings must have at least one dimension"));
    }
    for (i, e) in embeddings.iter().enumerate() {
        if e.len() != dimension {
            return Err(TrustError::invalid(format!(
                "embedding {i} has dimension {}, expected {dimension}",
                e.len()
            )));
        }
        if e.iter().any(|v| !v.is_finite()) {
            return Err(TrustError::invalid(format!(
                "embedding {i} contains a non-finite value"
            )));
        }
    }
    Ok(dimension)
}
