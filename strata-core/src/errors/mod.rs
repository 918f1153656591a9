//! Error handling for strata.
//! One error enum per concern, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod estimation_error;
pub mod order_error;
pub mod shape_error;
pub mod strata_error;

pub use config_error::ConfigError;
pub use error_code::StrataErrorCode;
pub use estimation_error::EstimationError;
pub use order_error::OrderError;
pub use shape_error::ShapeError;
pub use strata_error::{StrataError, StrataResult};
