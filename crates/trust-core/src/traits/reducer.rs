use crate::errors::TrustResult;

/// Dimensionality reduction applied before fitting the estimator.
///
/// Stochastic reducers must draw all randomness from `seed`.
pub trait Reducer {
    /// Learn the projection from `features` and project them.
    fn fit_transform(&mut self, features: &[Vec<f32>], seed: u64) -> TrustResult<Vec<Vec<f32>>>;

    /// Project with the projection learned by the last `fit_transform`.
    fn transform(&self, features: &[Vec<f32>]) -> TrustResult<Vec<Vec<f32>>>;
}
