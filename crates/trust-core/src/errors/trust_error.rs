//! Estimator errors.

use super::error_code::{self, TrustErrorCode};
use super::ConfigError;
use crate::models::ClassLabel;

/// Errors raised by `fit`, `score`, and the evaluation harness.
///
/// Every error is raised at the offending call; no partial result is ever
/// returned alongside one.
#[derive(Debug, thiserror::Error)]
pub enum TrustError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("estimator has not been fitted")]
    UnfittedEstimator,

    #[error("unknown label {label}: no fitted class index")]
    UnknownLabel { label: ClassLabel },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("another fit is already in progress")]
    FitInProgress,

    #[error("classifier failed: {reason}")]
    Classifier { reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TrustError {
    /// Shorthand for `InvalidInput`.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl TrustErrorCode for TrustError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => error_code::INVALID_INPUT,
            Self::UnfittedEstimator => error_code::UNFITTED_ESTIMATOR,
            Self::UnknownLabel { .. } => error_code::UNKNOWN_LABEL,
            Self::DimensionMismatch { .. } => error_code::DIMENSION_MISMATCH,
            Self::FitInProgress => error_code::FIT_IN_PROGRESS,
            Self::Classifier { .. } => error_code::CLASSIFIER_ERROR,
            Self::Config(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}
