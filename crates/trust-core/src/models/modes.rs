//! Fit-time modes selected through configuration.

use serde::{Deserialize, Serialize};

/// How low-confidence reference points are identified before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Keep every reference point.
    #[default]
    None,
    /// Drop points whose k-th same-class neighbor is farthest away.
    Density,
    /// Drop points an auxiliary classifier is least confident about.
    Uncertainty,
}

impl FilterMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Density => "density",
            Self::Uncertainty => "uncertainty",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "density" => Some(Self::Density),
            "uncertainty" => Some(Self::Uncertainty),
            _ => None,
        }
    }
}

/// Spatial index backing each class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    #[default]
    KdTree,
    BruteForce,
}

impl IndexKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::KdTree => "kd_tree",
            Self::BruteForce => "brute_force",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "kd_tree" | "kdtree" => Some(Self::KdTree),
            "brute_force" | "brute" => Some(Self::BruteForce),
            _ => None,
        }
    }
}
