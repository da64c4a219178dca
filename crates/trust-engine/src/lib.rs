//! # trust-engine
//!
//! Fits one nearest-neighbor index per class over (optionally filtered)
//! reference embeddings, then scores predictions by the ratio of the
//! distance to the closest other class over the distance to the predicted
//! class.

pub mod class_index;
pub mod estimator;
pub mod filtering;
pub mod fitted_state;
pub mod scoring;
pub mod snapshot;

pub use class_index::ClassIndex;
pub use estimator::TrustScoreEstimator;
pub use filtering::KnnVoteClassifier;
pub use fitted_state::FittedState;
pub use snapshot::{ClassSnapshot, FittedSnapshot};
