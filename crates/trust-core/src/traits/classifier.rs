use crate::errors::TrustResult;
use crate::models::{ClassLabel, Prediction};

/// The model under evaluation. Training is the implementor's business.
pub trait Classifier {
    /// Train on `train` and predict every row of `test`.
    fn fit_predict(
        &mut self,
        train: &[Vec<f32>],
        train_labels: &[ClassLabel],
        test: &[Vec<f32>],
    ) -> TrustResult<Vec<Prediction>>;

    fn name(&self) -> &str;
}
