//! Top-level strata configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{defaults, EstimatorConfig, LoggingConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`STRATA_*`)
/// 2. Project config (`strata.toml` in the project root)
/// 3. User config (`~/.strata/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StrataConfig {
    pub estimator: EstimatorConfig,
    pub logging: LoggingConfig,
}

impl StrataConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. Unreadable files are skipped, bad TOML is not.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) | Err(ConfigError::FileNotFound { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        let project_config_path = root.join(defaults::PROJECT_CONFIG_FILENAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &StrataConfig) -> Result<(), ConfigError> {
        config.estimator.validate()
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the user config path: `~/.strata/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(defaults::USER_CONFIG_DIRNAME).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut StrataConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: StrataConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` override.
    fn merge(base: &mut StrataConfig, other: &StrataConfig) {
        let (b, o) = (&mut base.estimator, &other.estimator);
        if o.gamma.is_some() {
            b.gamma = o.gamma;
        }
        if o.criterion.is_some() {
            b.criterion = o.criterion;
        }
        if o.max_iter.is_some() {
            b.max_iter = o.max_iter;
        }
        if o.parallel.is_some() {
            b.parallel = o.parallel;
        }
        if o.signed.is_some() {
            b.signed = o.signed;
        }

        if other.logging.filter.is_some() {
            base.logging.filter = other.logging.filter.clone();
        }
        if other.logging.json.is_some() {
            base.logging.json = other.logging.json;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `STRATA_ESTIMATOR_GAMMA`, `STRATA_ESTIMATOR_MAX_ITER`, etc.
    /// A present but unparsable value is a validation error naming the variable.
    fn apply_env_overrides(config: &mut StrataConfig) -> Result<(), ConfigError> {
        let est = &mut config.estimator;
        if let Some(v) = env_value::<f64>("ESTIMATOR_GAMMA")? {
            est.gamma = Some(v);
        }
        if let Some(v) = env_value("ESTIMATOR_CRITERION")? {
            est.criterion = Some(v);
        }
        if let Some(v) = env_value::<usize>("ESTIMATOR_MAX_ITER")? {
            est.max_iter = Some(v);
        }
        if let Some(v) = env_value::<bool>("ESTIMATOR_PARALLEL")? {
            est.parallel = Some(v);
        }
        if let Some(v) = env_value::<bool>("ESTIMATOR_SIGNED")? {
            est.signed = Some(v);
        }
        if let Some(v) = env_value::<bool>("LOG_JSON")? {
            config.logging.json = Some(v);
        }
        Ok(())
    }
}

/// Read and parse `STRATA_<suffix>`.
fn env_value<T: std::str::FromStr>(suffix: &str) -> Result<Option<T>, ConfigError> {
    let key = format!("{}{suffix}", defaults::ENV_PREFIX);
    match std::env::var(&key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::ValidationFailed {
                field: key,
                message: format!("cannot parse value '{raw}'"),
            }),
        Err(_) => Ok(None),
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
