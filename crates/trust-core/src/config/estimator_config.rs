use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::MAX_NEIGHBORS;
use crate::errors::ConfigError;
use crate::models::{DistanceMetric, FilterMode, IndexKind};

/// Estimator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Neighbor count for the density filter and the built-in k-NN vote.
    pub filter_k: usize,
    /// Neighbor rank used for `d_same` when `score` gets no explicit k.
    pub score_k: usize,
    /// Fraction of each class discarded before indexing, in `[0, 1)`.
    pub alpha: f64,
    pub filtering: FilterMode,
    pub metric: DistanceMetric,
    pub index: IndexKind,
    /// Maximum points per k-d tree leaf.
    pub leaf_size: usize,
    /// Skip stored points at distance zero from the query.
    pub exclude_self_match: bool,
    /// Added to `d_same` before dividing.
    pub epsilon: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            filter_k: defaults::DEFAULT_FILTER_K,
            score_k: defaults::DEFAULT_SCORE_K,
            alpha: defaults::DEFAULT_ALPHA,
            filtering: FilterMode::default(),
            metric: DistanceMetric::default(),
            index: IndexKind::default(),
            leaf_size: defaults::DEFAULT_LEAF_SIZE,
            exclude_self_match: defaults::DEFAULT_EXCLUDE_SELF_MATCH,
            epsilon: defaults::DEFAULT_EPSILON,
        }
    }
}

impl EstimatorConfig {
    /// Whether `fit` will discard any points.
    pub fn filters(&self) -> bool {
        self.alpha > 0.0 && self.filtering != FilterMode::None
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alpha.is_finite() || !(0.0..1.0).contains(&self.alpha) {
            return Err(invalid("estimator.alpha", "must be in [0, 1)"));
        }
        if self.filter_k == 0 || self.filter_k > MAX_NEIGHBORS {
            return Err(invalid(
                "estimator.filter_k",
                &format!("must be between 1 and {MAX_NEIGHBORS}"),
            ));
        }
        if self.score_k == 0 || self.score_k > MAX_NEIGHBORS {
            return Err(invalid(
                "estimator.score_k",
                &format!("must be between 1 and {MAX_NEIGHBORS}"),
            ));
        }
        if self.leaf_size == 0 {
            return Err(invalid("estimator.leaf_size", "must be at least 1"));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(invalid("estimator.epsilon", "must be a positive finite number"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
