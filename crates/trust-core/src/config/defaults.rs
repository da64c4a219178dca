//! Compiled default values.

// Estimator
pub const DEFAULT_FILTER_K: usize = 10;
pub const DEFAULT_SCORE_K: usize = 1;
pub const DEFAULT_ALPHA: f64 = 0.0;
pub const DEFAULT_LEAF_SIZE: usize = 16;
pub const DEFAULT_EXCLUDE_SELF_MATCH: bool = false;
pub const DEFAULT_EPSILON: f64 = 1e-12;

// Evaluation
pub const DEFAULT_N_FOLDS: usize = 5;
pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_EVAL_SCORE_K: usize = 5;
pub const DEFAULT_PREDICT_CORRECT: bool = true;
pub const DEFAULT_PERCENTILE_STEP: f64 = 5.0;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
