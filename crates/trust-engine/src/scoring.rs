//! The trust ratio for a single query against a fitted state.

use trust_core::errors::{TrustError, TrustResult};
use trust_core::models::{ClassLabel, Neighbor, QueryScore, SelfMatch};

use crate::fitted_state::FittedState;

/// Score one query whose dimension and label have been validated.
///
/// `d_same` is the distance to the k-th nearest point of `predicted`;
/// `d_other` the distance to the nearest point of any other class. Other
/// classes are visited in ascending label order and only a strictly closer
/// candidate replaces the current best, so ties go to the lowest label and,
/// within a class, to the lowest source index.
pub fn score_query(
    state: &FittedState,
    query: &[f32],
    predicted: ClassLabel,
    k: usize,
    self_match: SelfMatch,
) -> TrustResult<QueryScore> {
    let own = state
        .class(predicted)
        .ok_or(TrustError::UnknownLabel { label: predicted })?;
    let same = own.kth_nearest(query, k, self_match);

    let mut closest_other: Option<(ClassLabel, Neighbor)> = None;
    for (&label, class) in state.classes() {
        if label == predicted {
            continue;
        }
        if let Some(n) = class.nearest(query, self_match) {
            let closer = closest_other.map_or(true, |(_, best)| n.distance < best.distance);
            if closer {
                closest_other = Some((label, n));
            }
        }
    }

    let predicted_distance = same.map_or(f64::INFINITY, |n| n.distance);
    let closest_other_distance = closest_other.map_or(f64::INFINITY, |(_, n)| n.distance);
    Ok(QueryScore {
        trust_score: trust_ratio(
            same.is_some(),
            predicted_distance,
            closest_other_distance,
            state.config().epsilon,
        ),
        predicted_distance,
        closest_other_distance,
        closest_other_label: closest_other.map(|(label, _)| label),
        predicted_neighbor_index: same.map(|n| n.index),
        closest_other_neighbor_index: closest_other.map(|(_, n)| n.index),
    })
}

/// `d_other / (d_same + epsilon)`; zero when the predicted class offered no
/// candidate at all.
pub fn trust_ratio(has_same: bool, d_same: f64, d_other: f64, epsilon: f64) -> f64 {
    if !has_same {
        return 0.0;
    }
    d_other / (d_same + epsilon)
}
