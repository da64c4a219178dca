//! Span definitions per operation: fit, filter, score, evaluation.
//!
//! Each span carries its operation's sizes via the `tracing` crate.

/// Create a fit span.
#[macro_export]
macro_rules! fit_span {
    ($points:expr, $dimension:expr) => {
        tracing::info_span!("trust.fit", points = $points, dimension = $dimension)
    };
}

/// Create a filter span for one class.
#[macro_export]
macro_rules! filter_span {
    ($label:expr, $mode:expr) => {
        tracing::debug_span!("trust.filter", label = $label, mode = %$mode)
    };
}

/// Create a score span.
#[macro_export]
macro_rules! score_span {
    ($queries:expr, $k:expr) => {
        tracing::info_span!("trust.score", queries = $queries, k = $k)
    };
}

/// Create an evaluation span for one fold.
#[macro_export]
macro_rules! evaluation_span {
    ($fold:expr) => {
        tracing::info_span!("trust.evaluation", fold = $fold)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const FIT: &str = "trust.fit";
    pub const FILTER: &str = "trust.filter";
    pub const SCORE: &str = "trust.score";
    pub const EVALUATION: &str = "trust.evaluation";
}
