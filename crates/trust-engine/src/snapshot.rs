//! Serializable form of a fitted state.
//!
//! Only retained points and their source indices are stored; indexes are
//! rebuilt on restore, which reproduces identical scores.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use trust_core::config::EstimatorConfig;
use trust_core::constants::VERSION;
use trust_core::errors::{TrustError, TrustResult};
use trust_core::models::ClassLabel;

use crate::class_index::ClassIndex;
use crate::fitted_state::{validate_embeddings, FittedState};

/// One class's retained reference points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSnapshot {
    pub label: ClassLabel,
    pub source_indices: Vec<usize>,
    pub points: Vec<Vec<f32>>,
}

/// Everything needed to rebuild a fitted estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedSnapshot {
    /// Crate version that wrote the snapshot.
    pub version: String,
    pub dimension: usize,
    pub config: EstimatorConfig,
    pub classes: Vec<ClassSnapshot>,
}

impl FittedSnapshot {
    pub fn to_json(&self) -> TrustResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> TrustResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl FittedState {
    pub fn to_snapshot(&self) -> FittedSnapshot {
        FittedSnapshot {
            version: VERSION.to_string(),
            dimension: self.dimension(),
            config: self.config().clone(),
            classes: self.classes().values().map(class_snapshot).collect(),
        }
    }

    /// Rebuild indexes from a snapshot.
    ///
    /// # Errors
    /// `InvalidInput` for an invalid config, no classes, duplicate labels,
    /// empty classes, source indices that are not strictly ascending within
    /// a class or that repeat across classes, or points that disagree with
    /// the recorded dimension.
    pub fn from_snapshot(snapshot: FittedSnapshot) -> TrustResult<Self> {
        snapshot.config.validate()?;
        if snapshot.classes.is_empty() {
            return Err(TrustError::invalid("snapshot has no classes"));
        }
        let mut classes = BTreeMap::new();
        let mut seen_sources = HashSet::new();
        for class in snapshot.classes {
            if class.points.len() != class.source_indices.len() {
                return Err(TrustError::invalid(format!(
                    "snapshot class {} has {} points but {} source indices",
                    class.label,
                    class.points.len(),
                    class.source_indices.len()
                )));
            }
            let dimension = validate_embeddings(&class.points).map_err(|_| {
                TrustError::invalid(format!("snapshot class {} has invalid points", class.label))
            })?;
            if dimension != snapshot.dimension {
                return Err(TrustError::DimensionMismatch {
                    expected: snapshot.dimension,
                    actual: dimension,
                });
            }
            // Tie-breaking relies on position order matching source order.
            if class.source_indices.windows(2).any(|w| w[0] >= w[1]) {
                return Err(TrustError::invalid(format!(
                    "snapshot class {} source indices are not strictly ascending",
                    class.label
                )));
            }
            if let Some(&shared) = class
                .source_indices
                .iter()
                .find(|&&s| !seen_sources.insert(s))
            {
                return Err(TrustError::invalid(format!(
                    "snapshot source index {shared} appears in more than one class"
                )));
            }
            if classes.contains_key(&class.label) {
                return Err(TrustError::invalid(format!(
                    "snapshot repeats class {}",
                    class.label
                )));
            }
            let index = ClassIndex::build(
                class.label,
                class.points,
                class.source_indices,
                &snapshot.config,
            );
            classes.insert(class.label, index);
        }
        Ok(FittedState::from_parts(
            classes,
            snapshot.dimension,
            snapshot.config,
        ))
    }
}

/// Copy one class's retained points out of its index.
pub fn class_snapshot(class: &ClassIndex) -> ClassSnapshot {
    ClassSnapshot {
        label: class.label(),
        source_indices: class.source_indices().to_vec(),
        points: class.points().map(<[f32]>::to_vec).collect(),
    }
}
