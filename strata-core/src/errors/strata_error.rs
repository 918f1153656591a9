//! Top-level error aggregating every subsystem error via `From` conversions.

use super::StrataErrorCode;
use super::{ConfigError, EstimationError, OrderError, ShapeError};

/// Any error surfaced by the public strata API.
#[derive(Debug, thiserror::Error)]
pub enum StrataError {
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("Estimation error: {0}")]
    Estimation(#[from] EstimationError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StrataErrorCode for StrataError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Shape(e) => e.error_code(),
            Self::Estimation(e) => e.error_code(),
            Self::Order(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type StrataResult<T> = Result<T, StrataError>;
