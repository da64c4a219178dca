use serde::{Deserialize, Serialize};

/// A neighbor returned by an index query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Position of the point inside the index that produced it.
    pub index: usize,
    /// Distance from the query under the index's metric.
    pub distance: f64,
}

/// Whether a query may match a stored point at distance zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelfMatch {
    #[default]
    Allow,
    /// Skip stored points that coincide exactly with the query.
    Exclude,
}

impl SelfMatch {
    pub fn from_exclude(exclude: bool) -> Self {
        if exclude {
            Self::Exclude
        } else {
            Self::Allow
        }
    }

    /// Whether a candidate at `distance` survives this policy.
    pub fn admits(&self, distance: f64) -> bool {
        match self {
            Self::Allow => true,
            Self::Exclude => distance > 0.0,
        }
    }
}
