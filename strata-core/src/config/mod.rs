//! Configuration system for strata.
//! TOML-based, layered resolution: env > project > user > defaults.

pub mod defaults;
pub mod estimator_config;
pub mod logging_config;
pub mod strata_config;

pub use estimator_config::{EstimatorConfig, InformationCriterion};
pub use logging_config::LoggingConfig;
pub use strata_config::StrataConfig;
