//! Error handling for the trust-score workspace.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod trust_error;

pub use config_error::ConfigError;
pub use error_code::TrustErrorCode;
pub use trust_error::TrustError;

/// Convenience alias used throughout the workspace.
pub type TrustResult<T> = Result<T, TrustError>;
