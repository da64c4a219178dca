use serde::{Deserialize, Serialize};

use super::ClassLabel;

/// A classifier's output for one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: ClassLabel,
    /// Probability the classifier assigns to `label`.
    pub likelihood: f64,
}
