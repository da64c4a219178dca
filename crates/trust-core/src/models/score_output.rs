//! Results of a `score` call.

use serde::{Deserialize, Serialize};

use super::ClassLabel;

/// Score for a single query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryScore {
    /// `d_other / (d_same + epsilon)`.
    pub trust_score: f64,
    /// Distance to the k-th nearest point of the predicted class (`d_same`).
    pub predicted_distance: f64,
    /// Distance to the nearest point of any other class (`d_other`).
    pub closest_other_distance: f64,
    /// The class achieving `d_other`. `None` when no other class has a candidate.
    pub closest_other_label: Option<ClassLabel>,
    /// Source index of the neighbor used for `d_same`.
    pub predicted_neighbor_index: Option<usize>,
    /// Source index of the neighbor used for `d_other`.
    pub closest_other_neighbor_index: Option<usize>,
}

/// Parallel per-query sequences, all of length M.
///
/// Source indices refer to positions in the `embeddings` passed to `fit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutput {
    pub trust_scores: Vec<f64>,
    pub predicted_distances: Vec<f64>,
    pub closest_other_distances: Vec<f64>,
    pub closest_other_labels: Vec<Option<ClassLabel>>,
    pub predicted_neighbor_indices: Vec<Option<usize>>,
    pub closest_other_neighbor_indices: Vec<Option<usize>>,
}

impl ScoreOutput {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            trust_scores: Vec::with_capacity(capacity),
            predicted_distances: Vec::with_capacity(capacity),
            closest_other_distances: Vec::with_capacity(capacity),
            closest_other_labels: Vec::with_capacity(capacity),
            predicted_neighbor_indices: Vec::with_capacity(capacity),
            closest_other_neighbor_indices: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, score: QueryScore) {
        self.trust_scores.push(score.trust_score);
        self.predicted_distances.push(score.predicted_distance);
        self.closest_other_distances
            .push(score.closest_other_distance);
        self.closest_other_labels.push(score.closest_other_label);
        self.predicted_neighbor_indices
            .push(score.predicted_neighbor_index);
        self.closest_other_neighbor_indices
            .push(score.closest_other_neighbor_index);
    }

    pub fn len(&self) -> usize {
        self.trust_scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trust_scores.is_empty()
    }

    /// The score of query `i`, reassembled from the parallel sequences.
    pub fn get(&self, i: usize) -> Option<QueryScore> {
        Some(QueryScore {
            trust_score: *self.trust_scores.get(i)?,
            predicted_distance: *self.predicted_distances.get(i)?,
            closest_other_distance: *self.closest_other_distances.get(i)?,
            closest_other_label: *self.closest_other_labels.get(i)?,
            predicted_neighbor_index: *self.predicted_neighbor_indices.get(i)?,
            closest_other_neighbor_index: *self.closest_other_neighbor_indices.get(i)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = QueryScore> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl FromIterator<QueryScore> for ScoreOutput {
    fn from_iter<I: IntoIterator<Item = QueryScore>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        for score in iter {
            out.push(score);
        }
        out
    }
}
