//! Error types for the numeric range-regex compiler.

use thiserror::Error;

/// Errors produced while parsing decimal literals or compiling range
/// patterns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// The input is not non-exponential decimal text
    /// (optional leading `-`, digits, optional `.` and digits).
    #[error("malformed decimal literal: '{0}'")]
    MalformedLiteral(String),
}

/// Result type for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
