/// trust-score version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the project-level config file looked up by `TrustConfig::load`.
pub const CONFIG_FILE_NAME: &str = "trust.toml";

/// Upper bound on the neighbor count accepted by `fit` filtering and `score`.
pub const MAX_NEIGHBORS: usize = 10_000;
