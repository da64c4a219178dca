//! Stable, machine-readable error codes.

pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const UNFITTED_ESTIMATOR: &str = "UNFITTED_ESTIMATOR";
pub const UNKNOWN_LABEL: &str = "UNKNOWN_LABEL";
pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
pub const FIT_IN_PROGRESS: &str = "FIT_IN_PROGRESS";
pub const CLASSIFIER_ERROR: &str = "CLASSIFIER_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

/// Maps an error to a stable code string.
pub trait TrustErrorCode {
    fn error_code(&self) -> &'static str;
}
