use crate::errors::TrustResult;
use crate::models::ClassLabel;

/// A classifier consulted by uncertainty filtering.
pub trait AuxiliaryClassifier: Send + Sync {
    /// Per-class probabilities for each embedding. Position `c` of a row is
    /// the probability of the `c`-th entry of [`classes`](Self::classes);
    /// missing positions count as zero.
    fn predict_proba(&self, embeddings: &[Vec<f32>]) -> TrustResult<Vec<Vec<f64>>>;

    /// Labels of the probability columns, in column order. `None` means
    /// column `c` is class `c`.
    fn classes(&self) -> Option<&[ClassLabel]> {
        None
    }

    /// Human-readable classifier name.
    fn name(&self) -> &str;
}
