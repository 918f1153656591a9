//! Numeric estimation errors.

use super::error_code::{self, StrataErrorCode};

/// Errors raised while fitting regressions on the data matrix.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimationError {
    #[error("column {column} has zero variance and cannot be standardized")]
    DegenerateInput { column: usize },

    #[error("non-finite value at row {row}, column {column}")]
    NonFiniteValue { row: usize, column: usize },

    #[error("{samples} samples cannot support {predictors} predictors; need more than {required}")]
    InsufficientSamples {
        samples: usize,
        predictors: usize,
        required: usize,
    },

    #[error("response is an exact linear function of its predictors")]
    ZeroNoiseVariance,

    #[error("fit for target {target} failed: {source}")]
    TargetFailed {
        target: usize,
        #[source]
        source: Box<EstimationError>,
    },
}

impl EstimationError {
    /// Attach the target node to an error raised during its fit.
    pub fn for_target(self, target: usize) -> Self {
        match self {
            already @ Self::TargetFailed { .. } => already,
            other => Self::TargetFailed {
                target,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping target context.
    pub fn root_cause(&self) -> &EstimationError {
        match self {
            Self::TargetFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl StrataErrorCode for EstimationError {
    fn error_code(&self) -> &'static str {
        match self.root_cause() {
            Self::DegenerateInput { .. } | Self::NonFiniteValue { .. } => {
                error_code::DEGENERATE_INPUT
            }
            _ => error_code::ESTIMATION_ERROR,
        }
    }
}
