//! # trust-observability
//!
//! Subscriber initialisation and span macros shared by the estimator and
//! the evaluation harness.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, spans::names};
