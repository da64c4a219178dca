//! Stratified shuffle splits.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use trust_core::errors::{TrustError, TrustResult};
use trust_core::models::ClassLabel;

/// Row positions of one split, each ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Independent random train/test splits that preserve class proportions.
///
/// Each split holds out `ceil(test_size * N)` points, allocated across
/// classes in proportion to their size with leftover slots going to the
/// largest fractional remainders (lowest label on ties). Every class keeps
/// at least one training point. All randomness comes from `seed`.
#[derive(Debug, Clone, PartialEq)]
pub struct StratifiedShuffleSplit {
    pub n_splits: usize,
    pub test_size: f64,
    pub seed: u64,
}

impl StratifiedShuffleSplit {
    pub fn new(n_splits: usize, test_size: f64, seed: u64) -> Self {
        Self {
            n_splits,
            test_size,
            seed,
        }
    }

    /// Generate `n_splits` splits of `labels`.
    ///
    /// # Errors
    /// `InvalidInput` for zero splits, a `test_size` outside `(0, 1)`, empty
    /// labels, a class with fewer than two members, or a test size that
    /// would leave some class without training points.
    pub fn split(&self, labels: &[ClassLabel]) -> TrustResult<Vec<TrainTestSplit>> {
        if self.n_splits == 0 {
            return Err(TrustError::invalid("n_splits must be at least 1"));
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(TrustError::invalid(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        if labels.is_empty() {
            return Err(TrustError::invalid("cannot split an empty label set"));
        }

        let mut by_class: BTreeMap<ClassLabel, Vec<usize>> = BTreeMap::new();
        for (i, &label) in labels.iter().enumerate() {
            by_class.entry(label).or_default().push(i);
        }
        if let Some((label, _)) = by_class.iter().find(|(_, rows)| rows.len() < 2) {
            return Err(TrustError::invalid(format!(
                "class {label} has fewer than two members"
            )));
        }

        let n = labels.len();
        let n_test = (self.test_size * n as f64).ceil() as usize;
        if n_test > n - by_class.len() {
            return Err(TrustError::invalid(format!(
                "test size {n_test} leaves fewer than one training point per class ({} classes, {n} points)",
                by_class.len()
            )));
        }
        let sizes: Vec<usize> = by_class.values().map(Vec::len).collect();
        let allocation = allocate(&sizes, n_test);

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut splits = Vec::with_capacity(self.n_splits);
        for _ in 0..self.n_splits {
            let mut train = Vec::with_capacity(n - n_test);
            let mut test = Vec::with_capacity(n_test);
            for (rows, &take) in by_class.values().zip(&allocation) {
                let mut shuffled = rows.clone();
                shuffled.shuffle(&mut rng);
                test.extend_from_slice(&shuffled[..take]);
                train.extend_from_slice(&shuffled[take..]);
            }
            train.sort_unstable();
            test.sort_unstable();
            splits.push(TrainTestSplit { train, test });
        }
        Ok(splits)
    }
}

/// Test points per class: proportional floor, then largest remainder.
/// Each class is capped at `size - 1`. Callers guarantee
/// `total <= sum(size - 1)`.
fn allocate(sizes: &[usize], total: usize) -> Vec<usize> {
    let n: usize = sizes.iter().sum();
    let quotas: Vec<f64> = sizes
        .iter()
        .map(|&s| total as f64 * s as f64 / n as f64)
        .collect();
    let mut alloc: Vec<usize> = quotas
        .iter()
        .zip(sizes)
        .map(|(q, &s)| (q.floor() as usize).min(s - 1))
        .collect();

    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&a, &b| {
        let fa = quotas[a] - quotas[a].floor();
        let fb = quotas[b] - quotas[b].floor();
        fb.total_cmp(&fa).then(a.cmp(&b))
    });

    let mut remaining = total - alloc.iter().sum::<usize>();
    while remaining > 0 {
        let mut progressed = false;
        for &c in &order {
            if remaining == 0 {
                break;
            }
            if alloc[c] < sizes[c] - 1 {
                alloc[c] += 1;
                remaining -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }
    alloc
}
