//! CLI-specific error types.
//!
//! Every CLI failure exits the process non-zero; the codes keep scripted
//! callers from parsing human-readable text.

use std::fmt;
use std::io;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Reading the request or writing the output failed
    Io,
    /// The request JSON does not describe a query
    BadRequest,
    /// The query was rejected by the planner
    PlanRejected,
    /// The literal passed to `regex` is not decimal text
    BadLiteral,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io => "SCANQL_CLI_IO_ERROR",
            Self::BadRequest => "SCANQL_CLI_BAD_REQUEST",
            Self::PlanRejected => "SCANQL_CLI_PLAN_REJECTED",
            Self::BadLiteral => "SCANQL_CLI_BAD_LITERAL",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// I/O failure
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::Io, message)
    }

    /// Malformed request JSON
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BadRequest, message)
    }

    /// Planner rejection
    pub fn plan_rejected(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::PlanRejected, message)
    }

    /// Malformed decimal literal
    pub fn bad_literal(message: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BadLiteral, message)
    }

    /// Returns the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
