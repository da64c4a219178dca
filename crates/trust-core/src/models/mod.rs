//! Data model shared across the workspace.

pub mod labels;
pub mod metric;
pub mod modes;
pub mod neighbor;
pub mod prediction;
pub mod score_output;

pub use labels::{ClassLabel, ExpectedClasses, Labels};
pub use metric::DistanceMetric;
pub use modes::{FilterMode, IndexKind};
pub use neighbor::{Neighbor, SelfMatch};
pub use prediction::Prediction;
pub use score_output::{QueryScore, ScoreOutput};
