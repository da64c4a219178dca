//! Precision of the points a score ranks highest.

use trust_core::errors::{TrustError, TrustResult};

use crate::percentile::percentile;

/// For each percentile, the fraction of target points among those whose
/// score is at or above that percentile, per curve.
///
/// With `predict_correct = false` every score is negated first, so the
/// lowest-scoring points are kept and targets should mark mistakes. A
/// percentile at which any curve keeps no points is `None` for all curves.
///
/// # Errors
/// `InvalidInput` if there are no curves, a curve's length differs from
/// `targets`, a score is NaN, or a percentile lies outside `[0, 100]`.
pub fn precision_at_percentiles(
    curves: &[Vec<f64>],
    targets: &[bool],
    percentiles: &[f64],
    predict_correct: bool,
) -> TrustResult<Vec<Option<Vec<f64>>>> {
    if curves.is_empty() {
        return Err(TrustError::invalid("at least one curve is required"));
    }
    for (i, curve) in curves.iter().enumerate() {
        if curve.len() != targets.len() {
            return Err(TrustError::invalid(format!(
                "curve {i} has {} scores for {} points",
                curve.len(),
                targets.len()
            )));
        }
        if curve.iter().any(|v| v.is_nan()) {
            return Err(TrustError::invalid(format!("curve {i} contains NaN")));
        }
    }

    let sign = if predict_correct { 1.0 } else { -1.0 };
    let signed: Vec<Vec<f64>> = curves
        .iter()
        .map(|c| c.iter().map(|v| sign * v).collect())
        .collect();

    percentiles
        .iter()
        .map(|&q| {
            let mut row = Vec::with_capacity(signed.len());
            for curve in &signed {
                let threshold = percentile(curve, q).ok_or_else(|| {
                    TrustError::invalid(format!("percentile {q} is outside [0, 100]"))
                })?;
                let (kept, hits) = curve
                    .iter()
                    .zip(targets)
                    .filter(|(v, _)| **v >= threshold)
                    .fold((0usize, 0usize), |(kept, hits), (_, &t)| {
                        (kept + 1, hits + usize::from(t))
                    });
                if kept == 0 {
                    return Ok(None);
                }
                row.push(hits as f64 / kept as f64);
            }
            Ok(Some(row))
        })
        .collect()
}
