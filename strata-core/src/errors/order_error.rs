//! Causal order errors.

use super::error_code::{self, StrataErrorCode};

/// Errors for operations that need a complete causal order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("no complete causal order: nodes {nodes:?} are on or behind a cycle")]
    CycleDetected { nodes: Vec<usize> },

    #[error("cannot parse causal order token {token:?}")]
    Parse { token: String },
}

impl StrataErrorCode for OrderError {
    fn error_code(&self) -> &'static str {
        error_code::ORDER_ERROR
    }
}
