// Single source of truth for all default values.

// --- Estimator ---
pub const DEFAULT_GAMMA: f64 = 1.0;
pub const DEFAULT_MAX_ITER: usize = 500;
pub const DEFAULT_PARALLEL: bool = false;
pub const DEFAULT_SIGNED: bool = false;

// --- Logging ---
pub const DEFAULT_LOG_FILTER: &str = "strata_order=info,strata_estimate=info";
pub const DEFAULT_LOG_JSON: bool = false;

// --- Files ---
pub const PROJECT_CONFIG_FILENAME: &str = "strata.toml";
pub const USER_CONFIG_DIRNAME: &str = ".strata";
pub const ENV_PREFIX: &str = "STRATA_";
pub const LOG_ENV_VAR: &str = "STRATA_LOG";
