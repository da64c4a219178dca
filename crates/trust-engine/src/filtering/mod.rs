//! Reference-point filtering applied per class before indexing.
//!
//! Both modes drop `floor(alpha * n)` points of a class of `n`. Ranking ties
//! drop the point with the higher source index first.

pub mod density;
pub mod uncertainty;

pub use uncertainty::{label_confidence, KnnVoteClassifier};

use tracing::debug;
use trust_core::config::EstimatorConfig;
use trust_core::errors::{TrustError, TrustResult};
use trust_core::models::{ClassLabel, FilterMode};

/// Points of one class, in ascending source order.
#[derive(Debug, Clone, Default)]
pub struct ClassPoints {
    pub points: Vec<Vec<f32>>,
    pub source_indices: Vec<usize>,
}

impl ClassPoints {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Number of points `alpha` removes from a class of `n`.
pub fn discard_count(n: usize, alpha: f64) -> usize {
    (alpha * n as f64).floor() as usize
}

/// Keep-mask that drops the `drop` positions with the highest `badness`.
pub fn keep_mask(badness: &[f64], drop: usize) -> Vec<bool> {
    let mut order: Vec<usize> = (0..badness.len()).collect();
    order.sort_by(|&a, &b| badness[b].total_cmp(&badness[a]).then(b.cmp(&a)));
    let mut keep = vec![true; badness.len()];
    for &i in order.iter().take(drop) {
        keep[i] = false;
    }
    keep
}

/// Apply the configured filter to one class.
///
/// `confidence` holds, per source index, the auxiliary classifier's
/// confidence in that point's own label; required for uncertainty filtering.
pub fn filter_class(
    label: ClassLabel,
    class: ClassPoints,
    config: &EstimatorConfig,
    confidence: Option<&[f64]>,
) -> TrustResult<ClassPoints> {
    let drop = if config.filters() {
        discard_count(class.len(), config.alpha)
    } else {
        0
    };
    if drop == 0 {
        return Ok(class);
    }

    let _span = trust_observability::filter_span!(label, config.filtering.name()).entered();
    let badness: Vec<f64> = match config.filtering {
        FilterMode::None => return Ok(class),
        FilterMode::Density => density::knn_radii(&class.points, config),
        FilterMode::Uncertainty => {
            let confidence = confidence.ok_or_else(|| TrustError::Classifier {
                reason: "uncertainty filtering requires label confidences".to_string(),
            })?;
            class
                .source_indices
                .iter()
                .map(|&s| 1.0 - confidence[s])
                .collect()
        }
    };

    let keep = keep_mask(&badness, drop);
    let mut retained = ClassPoints::default();
    for ((point, source), keep) in class
        .points
        .into_iter()
        .zip(class.source_indices)
        .zip(keep)
    {
        if keep {
            retained.points.push(point);
            retained.source_indices.push(source);
        }
    }
    debug!(
        label,
        dropped = drop,
        retained = retained.len(),
        "filtered class"
    );
    Ok(retained)
}
