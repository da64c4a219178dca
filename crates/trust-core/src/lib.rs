//! # trust-core
//!
//! Foundation crate for the trust-score workspace.
//! Defines the shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{EstimatorConfig, TrustConfig};
pub use errors::{TrustError, TrustResult};
pub use models::{
    ClassLabel, DistanceMetric, ExpectedClasses, FilterMode, IndexKind, Labels, Neighbor,
    QueryScore, ScoreOutput,
};
