//! Shape and index validation errors.

use super::error_code::{self, StrataErrorCode};

/// Malformed input shapes. Raised before any computation starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("{what} must be square, got {rows}x{cols}")]
    NotSquare {
        what: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("{what} dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("node {node} out of range for {n} variables")]
    NodeOutOfRange { node: usize, n: usize },

    #[error("node {node} appears more than once in the causal order")]
    DuplicateNode { node: usize },

    #[error("data matrix has no {what}")]
    EmptyData { what: &'static str },
}

impl StrataErrorCode for ShapeError {
    fn error_code(&self) -> &'static str {
        error_code::SHAPE_MISMATCH
    }
}
