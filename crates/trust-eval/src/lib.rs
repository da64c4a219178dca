//! # trust-eval
//!
//! Measures how well a score separates correct from incorrect predictions:
//! for each percentile threshold, the precision of the points scoring at or
//! above it, averaged over stratified shuffle splits.

pub mod percentile;
pub mod precision;
pub mod reducer;
pub mod runner;
pub mod split;

pub use percentile::percentile;
pub use precision::precision_at_percentiles;
pub use reducer::IdentityReducer;
pub use runner::{CurvePoint, PrecisionCurve, PrecisionCurveRunner, PrecisionReport};
pub use split::{StratifiedShuffleSplit, TrainTestSplit};
