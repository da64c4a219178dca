//! Class labels and their explicit encodings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{TrustError, TrustResult};

/// Class identifier.
pub type ClassLabel = usize;

/// Training labels with an explicit encoding.
///
/// One-hot rows are decoded by arg-max; when several positions share the
/// maximum the lowest position wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "values", rename_all = "snake_case")]
pub enum Labels {
    Integer(Vec<ClassLabel>),
    OneHot(Vec<Vec<f32>>),
}

impl Labels {
    /// Number of labelled points.
    pub fn len(&self) -> usize {
        match self {
            Self::Integer(v) => v.len(),
            Self::OneHot(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve to one integer label per point.
    ///
    /// # Errors
    /// `InvalidInput` for empty, ragged, or non-finite one-hot rows.
    pub fn decode(&self) -> TrustResult<Vec<ClassLabel>> {
        match self {
            Self::Integer(v) => Ok(v.clone()),
            Self::OneHot(rows) => {
                let width = rows.first().map(|r| r.len()).unwrap_or(0);
                rows.iter()
                    .enumerate()
                    .map(|(i, row)| {
                        if row.is_empty() {
                            return Err(TrustError::invalid(format!(
                                "one-hot row {i} is empty"
                            )));
                        }
                        if row.len() != width {
                            return Err(TrustError::invalid(format!(
                                "one-hot row {i} has width {}, expected {width}",
                                row.len()
                            )));
                        }
                        if row.iter().any(|v| !v.is_finite()) {
                            return Err(TrustError::invalid(format!(
                                "one-hot row {i} contains a non-finite value"
                            )));
                        }
                        Ok(arg_max(row))
                    })
                    .collect()
            }
        }
    }
}

impl From<Vec<ClassLabel>> for Labels {
    fn from(labels: Vec<ClassLabel>) -> Self {
        Self::Integer(labels)
    }
}

/// Position of the largest value; first position on ties.
fn arg_max(row: &[f32]) -> ClassLabel {
    let mut best = 0;
    for (i, &v) in row.iter().enumerate().skip(1) {
        if v > row[best] {
            best = i;
        }
    }
    best
}

/// The class set a fit is expected to cover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExpectedClasses {
    /// The distinct labels present in the training data.
    #[default]
    Observed,
    /// Labels `0..n`.
    Count(usize),
    /// An explicit label set.
    Labels(BTreeSet<ClassLabel>),
}

impl ExpectedClasses {
    /// Resolve against the decoded training labels.
    ///
    /// Every expected class needs at least one point, so a set larger than
    /// `observed` is rejected before it is built.
    ///
    /// # Errors
    /// `InvalidInput` if the set is empty, has more classes than there are
    /// points, or an observed label falls outside it.
    pub fn resolve(&self, observed: &[ClassLabel]) -> TrustResult<BTreeSet<ClassLabel>> {
        let size = match self {
            Self::Observed => 0,
            Self::Count(n) => *n,
            Self::Labels(set) => set.len(),
        };
        if size > observed.len() {
            return Err(TrustError::invalid(format!(
                "{size} expected classes but only {} points",
                observed.len()
            )));
        }
        let expected: BTreeSet<ClassLabel> = match self {
            Self::Observed => observed.iter().copied().collect(),
            Self::Count(n) => (0..*n).collect(),
            Self::Labels(set) => set.clone(),
        };
        if expected.is_empty() {
            return Err(TrustError::invalid("expected class set is empty"));
        }
        if let Some(stray) = observed.iter().find(|l| !expected.contains(l)) {
            return Err(TrustError::invalid(format!(
                "label {stray} is not in the expected class set"
            )));
        }
        Ok(expected)
    }
}
