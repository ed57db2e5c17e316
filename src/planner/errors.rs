//! Planner error types.
//!
//! Every planning failure rejects the query before any store access
//! happens: there is no partial plan and nothing is deferred into the scan
//! phase. Error codes are part of the public contract and stable across
//! releases.

use std::fmt;

/// Severity of a planner error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The query is rejected; the store was never contacted.
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Stable planner error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Relational operator applied to a non-numeric literal.
    UnsupportedComparison,
    /// A `REG#` value whose pattern does not compile.
    InvalidRegex,
    /// Table source is not of the form `table#family`.
    InvalidTableSource,
    /// Limit present but not a positive integer.
    InvalidLimit,
    /// Stop-key adjustment left the Unicode scalar range.
    InvalidStopKey,
    /// Start/stop ordering contradicts the scan direction.
    RangeOrderViolation,
}

impl PlannerErrorCode {
    /// Returns the stable string code.
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::UnsupportedComparison => "SCANQL_UNSUPPORTED_COMPARISON",
            PlannerErrorCode::InvalidRegex => "SCANQL_INVALID_REGEX",
            PlannerErrorCode::InvalidTableSource => "SCANQL_INVALID_TABLE_SOURCE",
            PlannerErrorCode::InvalidLimit => "SCANQL_INVALID_LIMIT",
            PlannerErrorCode::InvalidStopKey => "SCANQL_INVALID_STOP_KEY",
            PlannerErrorCode::RangeOrderViolation => "SCANQL_RANGE_ORDER_VIOLATION",
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error with full context.
#[derive(Debug, Clone)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
    column: Option<String>,
}

impl PlannerError {
    /// Relational operator on a non-numeric literal.
    pub fn unsupported_comparison(
        column: impl Into<String>,
        op: &str,
        value: impl Into<String>,
    ) -> Self {
        let column = column.into();
        Self {
            code: PlannerErrorCode::UnsupportedComparison,
            message: format!(
                "operator '{op}' on column '{column}' requires a decimal literal, got '{}'",
                value.into()
            ),
            column: Some(column),
        }
    }

    /// `REG#` pattern failed to compile.
    pub fn invalid_regex(column: impl Into<String>, detail: impl fmt::Display) -> Self {
        let column = column.into();
        Self {
            code: PlannerErrorCode::InvalidRegex,
            message: format!("invalid regex on column '{column}': {detail}"),
            column: Some(column),
        }
    }

    /// Malformed `table#family` source.
    pub fn invalid_table_source(source: impl Into<String>) -> Self {
        Self {
            code: PlannerErrorCode::InvalidTableSource,
            message: format!(
                "table source '{}' must be of the form table#family",
                source.into()
            ),
            column: None,
        }
    }

    /// Zero limit.
    pub fn invalid_limit() -> Self {
        Self {
            code: PlannerErrorCode::InvalidLimit,
            message: "limit must be a positive integer".into(),
            column: None,
        }
    }

    /// Stop-key adjustment produced an unencodable character.
    pub fn invalid_stop_key(key: impl Into<String>) -> Self {
        Self {
            code: PlannerErrorCode::InvalidStopKey,
            message: format!(
                "stop key '{}' cannot be adjusted past the last code point",
                key.into()
            ),
            column: None,
        }
    }

    /// Start/stop ordering contradicts the scan direction.
    pub fn range_order(start: &str, stop: &str, reversed: bool) -> Self {
        let message = if reversed {
            format!("reversed scan requires startRowKey[{start}] >= stopRowKey[{stop}]")
        } else {
            format!("forward scan requires startRowKey[{start}] <= stopRowKey[{stop}]")
        };
        Self {
            code: PlannerErrorCode::RangeOrderViolation,
            message,
            column: None,
        }
    }

    /// Returns the error code.
    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    /// Returns the severity level.
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending column, when one is known.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for PlannerError {}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_codes() {
        assert_eq!(
            PlannerErrorCode::UnsupportedComparison.code(),
            "SCANQL_UNSUPPORTED_COMPARISON"
        );
        assert_eq!(
            PlannerErrorCode::RangeOrderViolation.code(),
            "SCANQL_RANGE_ORDER_VIOLATION"
        );
        assert_eq!(
            PlannerErrorCode::InvalidTableSource.code(),
            "SCANQL_INVALID_TABLE_SOURCE"
        );
    }

    #[test]
    fn test_display_carries_code_and_message() {
        let err = PlannerError::unsupported_comparison("speed", ">", "fast");
        let text = format!("{err}");
        assert!(text.contains("SCANQL_UNSUPPORTED_COMPARISON"));
        assert!(text.contains("speed"));
        assert!(text.contains("REJECT"));
    }

    #[test]
    fn test_range_order_message_names_direction() {
        let fwd = PlannerError::range_order("b", "a", false);
        assert!(fwd.message().contains("forward"));
        let rev = PlannerError::range_order("a", "b", true);
        assert!(rev.message().contains("reversed"));
    }
}
