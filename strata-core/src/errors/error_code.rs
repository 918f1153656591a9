//! StrataErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured error code string
/// that callers can match on without parsing messages.
pub trait StrataErrorCode {
    /// Returns the error code string (e.g., "SHAPE_MISMATCH").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants.
pub const SHAPE_MISMATCH: &str = "SHAPE_MISMATCH";
pub const DEGENERATE_INPUT: &str = "DEGENERATE_INPUT";
pub const ESTIMATION_ERROR: &str = "ESTIMATION_ERROR";
pub const ORDER_ERROR: &str = "ORDER_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
