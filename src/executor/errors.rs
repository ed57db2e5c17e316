//! Executor-boundary error types.

use thiserror::Error;

/// Errors surfaced by a scan executor while driving a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// The per-row callback raised; delivery stopped, rows already
    /// delivered are not retracted.
    #[error("row callback aborted after {delivered} rows: {reason}")]
    RowCallbackAborted { delivered: u64, reason: String },
    /// The underlying store failed.
    #[error("store error: {0}")]
    Store(String),
}

impl ExecutorError {
    /// Returns the stable string code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::RowCallbackAborted { .. } => "SCANQL_ROW_CALLBACK_ABORTED",
            ExecutorError::Store(_) => "SCANQL_STORE_ERROR",
        }
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
