use trust_core::errors::TrustResult;
use trust_core::traits::Reducer;

/// Passes features through unchanged, for data that is already embedded.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityReducer;

impl Reducer for IdentityReducer {
    fn fit_transform(&mut self, features: &[Vec<f32>], _seed: u64) -> TrustResult<Vec<Vec<f32>>> {
        Ok(features.to_vec())
    }

    fn transform(&self, features: &[Vec<f32>]) -> TrustResult<Vec<Vec<f32>>> {
        Ok(features.to_vec())
    }
}
