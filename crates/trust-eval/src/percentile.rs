//! Percentiles with linear interpolation between closest ranks.

/// The `q`-th percentile of `values`, `q` in `[0, 100]`.
///
/// Sorts a copy and interpolates linearly between the two closest ranks, so
/// `q = 0` is the minimum and `q = 100` the maximum. Infinite values are
/// allowed; an interpolation between `-inf` and `+inf` yields the lower
/// bound. Returns `None` for empty input or a `q` outside the range.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    let (low, high) = (sorted[lo], sorted[hi]);
    if frac == 0.0 || low == high {
        return Some(low);
    }
    let value = low + (high - low) * frac;
    Some(if value.is_nan() { low } else { value })
}
