//! Scan executor interface.
//!
//! Plan execution lives outside this crate: a real executor owns the store
//! connection, translates [`FilterNode`] trees into the store's native
//! filter primitives, and pulls rows. This module pins down the contract
//! both sides agree on, so the compiler and any executor implementation
//! can evolve independently.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{TimeZone, Utc};

use crate::planner::ScanPlan;

use super::errors::ExecutorResult;

/// One delivered row: column name to string value, plus the reserved
/// `rowKey` entry. Ordered so delivery is deterministic.
pub type Row = BTreeMap<String, String>;

/// Error raised by a per-row callback to stop further delivery.
///
/// Rows already delivered are not retracted; the executor wraps this into
/// [`ExecutorError::RowCallbackAborted`](super::ExecutorError).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAbort {
    message: String,
}

impl RowAbort {
    /// Creates an abort signal with the given reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the abort reason.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RowAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RowAbort {}

/// Per-scan execution options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// When set, cell values are replaced by their insertion timestamp,
    /// rendered with [`format_cell_timestamp`].
    pub return_column_timestamp: bool,
}

/// Drives a [`ScanPlan`] against a live store.
///
/// Implementations must honor the plan's range, direction, projection,
/// and filter tree; fetch at most [`ScanPlan::batch_hint`] rows per round
/// trip; stop pulling once the cap is reached (counting delivered rows);
/// and stop immediately when the callback returns a [`RowAbort`].
/// Returns the number of rows delivered.
pub trait ScanExecutor {
    fn scan(
        &self,
        plan: &ScanPlan,
        options: &ScanOptions,
        on_row: &mut dyn FnMut(Row) -> Result<(), RowAbort>,
    ) -> ExecutorResult<u64>;
}

/// Renders a cell timestamp (milliseconds since the epoch, UTC) in the
/// `yyyy-MM-dd HH:mm:ss.SSS` form used when
/// [`ScanOptions::return_column_timestamp`] is set.
pub fn format_cell_timestamp(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(when) => when.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecutorError;
    use crate::planner::{QueryPlanBuilder, QueryRequest};

    /// Executor over a fixed row list, enough to pin the callback
    /// contract.
    struct FixedRows(Vec<Row>);

    impl ScanExecutor for FixedRows {
        fn scan(
            &self,
            plan: &ScanPlan,
            _options: &ScanOptions,
            on_row: &mut dyn FnMut(Row) -> Result<(), RowAbort>,
        ) -> ExecutorResult<u64> {
            let cap = plan.cap.unwrap_or(u64::MAX);
            let mut delivered = 0;
            for row in &self.0 {
                if delivered == cap {
                    break;
                }
                if let Err(abort) = on_row(row.clone()) {
                    return Err(ExecutorError::RowCallbackAborted {
                        delivered,
                        reason: abort.message().to_string(),
                    });
                }
                delivered += 1;
            }
            Ok(delivered)
        }
    }

    fn row(key: &str) -> Row {
        Row::from([("rowKey".to_string(), key.to_string())])
    }

    #[test]
    fn test_callback_abort_stops_delivery() {
        let executor = FixedRows(vec![row("a"), row("b"), row("c")]);
        let plan = QueryPlanBuilder::new()
            .build(&QueryRequest::new("t#f"))
            .unwrap();

        let mut seen = 0;
        let result = executor.scan(&plan, &ScanOptions::default(), &mut |_| {
            if seen == 1 {
                return Err(RowAbort::new("enough"));
            }
            seen += 1;
            Ok(())
        });

        assert_eq!(
            result,
            Err(ExecutorError::RowCallbackAborted {
                delivered: 1,
                reason: "enough".to_string(),
            })
        );
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_cap_bounds_delivery() {
        let executor = FixedRows(vec![row("a"), row("b"), row("c")]);
        let plan = QueryPlanBuilder::new()
            .build(&QueryRequest::new("t#f").with_limit(2))
            .unwrap();

        let mut keys = Vec::new();
        let delivered = executor
            .scan(&plan, &ScanOptions::default(), &mut |r| {
                keys.push(r["rowKey"].clone());
                Ok(())
            })
            .unwrap();

        assert_eq!(delivered, 2);
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_timestamp_rendering() {
        assert_eq!(
            format_cell_timestamp(1_574_661_362_123),
            "2019-11-25 05:56:02.123"
        );
        assert_eq!(format_cell_timestamp(0), "1970-01-01 00:00:00.000");
    }
}
