//! Configuration system.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod defaults;
pub mod estimator_config;
pub mod evaluation_config;
pub mod observability_config;
pub mod trust_config;

pub use estimator_config::EstimatorConfig;
pub use evaluation_config::EvaluationConfig;
pub use observability_config::ObservabilityConfig;
pub use trust_config::TrustConfig;
