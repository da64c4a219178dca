//! Seeded synthetic datasets.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Embeddings with parallel integer labels.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticDataset {
    pub embeddings: Vec<Vec<f32>>,
    pub labels: Vec<usize>,
}

impl SyntheticDataset {
    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }
}

/// `per_class` isotropic Gaussian points around each center; class `i` is
/// centered at `centers[i]`. Points are grouped by class in label order.
///
/// # Panics
/// Panics if `spread` is negative or not finite.
pub fn gaussian_clusters(
    centers: &[Vec<f32>],
    per_class: usize,
    spread: f32,
    seed: u64,
) -> SyntheticDataset {
    let noise = Normal::new(0.0f32, spread)
        .unwrap_or_else(|e| panic!("invalid spread {spread}: {e}"));
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut embeddings = Vec::with_capacity(centers.len() * per_class);
    let mut labels = Vec::with_capacity(centers.len() * per_class);
    for (label, center) in centers.iter().enumerate() {
        for _ in 0..per_class {
            embeddings.push(
                center
                    .iter()
                    .map(|&c| c + noise.sample(&mut rng))
                    .collect(),
            );
            labels.push(label);
        }
    }
    SyntheticDataset { embeddings, labels }
}

/// Uniform points in `[-extent, extent)^dimension`.
pub fn uniform_points(count: usize, dimension: usize, extent: f32, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..dimension).map(|_| rng.gen_range(-extent..extent)).collect())
        .collect()
}
