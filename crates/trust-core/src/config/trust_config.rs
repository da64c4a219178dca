//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EstimatorConfig, EvaluationConfig, ObservabilityConfig};
use crate::constants::CONFIG_FILE_NAME;
use crate::errors::ConfigError;
use crate::models::{DistanceMetric, FilterMode, IndexKind};

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`TRUST_*`)
/// 2. Project config (`trust.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrustConfig {
    pub estimator: EstimatorConfig,
    pub evaluation: EvaluationConfig,
    pub observability: ObservabilityConfig,
}

impl TrustConfig {
    /// Load configuration from `root/trust.toml` (if present) and the environment.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.estimator.validate()?;
        self.evaluation.validate()?;
        if self.observability.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Apply `TRUST_*` environment variables. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut TrustConfig) {
        if let Ok(val) = std::env::var("TRUST_ALPHA") {
            if let Ok(v) = val.parse::<f64>() {
                config.estimator.alpha = v;
            }
        }
        if let Ok(val) = std::env::var("TRUST_FILTER_K") {
            if let Ok(v) = val.parse::<usize>() {
                config.estimator.filter_k = v;
            }
        }
        if let Ok(val) = std::env::var("TRUST_SCORE_K") {
            if let Ok(v) = val.parse::<usize>() {
                config.estimator.score_k = v;
            }
        }
        if let Ok(val) = std::env::var("TRUST_FILTERING") {
            if let Some(mode) = FilterMode::from_name(&val) {
                config.estimator.filtering = mode;
            }
        }
        if let Ok(val) = std::env::var("TRUST_METRIC") {
            if let Some(metric) = DistanceMetric::from_name(&val) {
                config.estimator.metric = metric;
            }
        }
        if let Ok(val) = std::env::var("TRUST_INDEX") {
            if let Some(kind) = IndexKind::from_name(&val) {
                config.estimator.index = kind;
            }
        }
        if let Ok(val) = std::env::var("TRUST_EXCLUDE_SELF_MATCH") {
            if let Ok(v) = val.parse::<bool>() {
                config.estimator.exclude_self_match = v;
            }
        }
        if let Ok(val) = std::env::var("TRUST_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.evaluation.seed = v;
            }
        }
        if let Ok(val) = std::env::var("TRUST_LOG_LEVEL") {
            config.observability.log_level = val;
        }
    }
}
