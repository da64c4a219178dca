//! Seams between the estimator and its collaborators.

pub mod auxiliary_classifier;
pub mod classifier;
pub mod neighbor_index;
pub mod reducer;

pub use auxiliary_classifier::AuxiliaryClassifier;
pub use classifier::Classifier;
pub use neighbor_index::NeighborIndex;
pub use reducer::Reducer;
