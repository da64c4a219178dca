//! Global `tracing` subscriber setup.

pub mod spans;

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use trust_core::config::ObservabilityConfig;
use trust_core::errors::ConfigError;

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG`, when set, takes precedence over `config.log_level`. Calling
/// this more than once is a no-op; returns whether this call installed it.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<bool, ConfigError> {
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directive) => EnvFilter::try_new(directive),
        Err(_) => EnvFilter::try_new(&config.log_level),
    }
    .map_err(|e| ConfigError::ValidationFailed {
        field: "observability.log_level".to_string(),
        message: e.to_string(),
    })?;

    let mut installed = false;
    INITIALISED.get_or_init(|| {
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let result = if config.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        // Another subscriber may already be global (e.g. set by the host).
        installed = result.is_ok();
    });
    Ok(installed)
}
