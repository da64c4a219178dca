use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Precision-curve evaluation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Number of stratified shuffle splits.
    pub n_folds: usize,
    /// Fraction of points held out per split, in `(0, 1)`.
    pub test_size: f64,
    /// Seed for every stochastic step (splits, reduction).
    pub seed: u64,
    /// Neighbor rank passed to `score` for each fold.
    pub score_k: usize,
    /// Percentiles in `[0, 100]` at which precision is measured.
    pub percentiles: Vec<f64>,
    /// Target correctly classified points (true) or misclassified ones (false).
    pub predict_correct: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        let steps = (100.0 / defaults::DEFAULT_PERCENTILE_STEP) as usize;
        Self {
            n_folds: defaults::DEFAULT_N_FOLDS,
            test_size: defaults::DEFAULT_TEST_SIZE,
            seed: defaults::DEFAULT_SEED,
            score_k: defaults::DEFAULT_EVAL_SCORE_K,
            percentiles: (0..steps)
                .map(|i| i as f64 * defaults::DEFAULT_PERCENTILE_STEP)
                .collect(),
            predict_correct: defaults::DEFAULT_PREDICT_CORRECT,
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_folds == 0 {
            return Err(invalid("evaluation.n_folds", "must be at least 1"));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(invalid("evaluation.test_size", "must be in (0, 1)"));
        }
        if self.score_k == 0 {
            return Err(invalid("evaluation.score_k", "must be at least 1"));
        }
        if self.percentiles.is_empty() {
            return Err(invalid("evaluation.percentiles", "must not be empty"));
        }
        if self
            .percentiles
            .iter()
            .any(|p| !p.is_finite() || !(0.0..=100.0).contains(p))
        {
            return Err(invalid(
                "evaluation.percentiles",
                "every percentile must be in [0, 100]",
            ));
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
