//! # strata-core
//!
//! Foundation crate for strata.
//! Defines the matrix and order types, errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{EstimatorConfig, InformationCriterion, LoggingConfig, StrataConfig};
pub use errors::{StrataError, StrataResult};
pub use types::{CausalOrder, PrecedenceMatrix, PriorKnowledge};
