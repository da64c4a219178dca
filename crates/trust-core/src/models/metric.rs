//! Distance metrics.

use serde::{Deserialize, Serialize};

/// Distance metric used for every neighbor query of a fitted estimator.
///
/// All variants satisfy `|a[i] - b[i]| <= d(a, b)` for every axis `i`,
/// which is the bound the k-d tree prunes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl DistanceMetric {
    /// Distance between two equal-length vectors, accumulated in `f64`.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f64 {
        let diffs = a.iter().zip(b).map(|(x, y)| (*x as f64 - *y as f64).abs());
        match self {
            Self::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            Self::Manhattan => diffs.sum(),
            Self::Chebyshev => diffs.fold(0.0, f64::max),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
        }
    }

    /// Parse a metric name as used in config files and env vars.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Some(Self::Euclidean),
            "manhattan" | "l1" | "cityblock" => Some(Self::Manhattan),
            "chebyshev" | "linf" => Some(Self::Chebyshev),
            _ => None,
        }
    }
}
