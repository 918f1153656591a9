//! Logging configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Tracing subscriber settings. `STRATA_LOG` still wins over `filter`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string, e.g. `strata_estimate=debug`.
    pub filter: Option<String>,
    /// Emit JSON lines instead of human-readable output.
    pub json: Option<bool>,
}

impl LoggingConfig {
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(defaults::DEFAULT_LOG_FILTER)
    }

    pub fn effective_json(&self) -> bool {
        self.json.unwrap_or(defaults::DEFAULT_LOG_JSON)
    }
}
