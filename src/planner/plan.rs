//! Scan plan value object.
//!
//! A `ScanPlan` is the finished product of query compilation: an immutable,
//! independently shareable description of one range scan. It is built once
//! per query and never mutated afterwards; the external scan executor is
//! its only consumer.

use serde::Serialize;

use super::errors::{PlannerError, PlannerResult};
use super::filter::FilterNode;

/// Upper bound on the per-round-trip prefetch advice, regardless of the
/// requested cap, to bound memory and latency per network call.
pub const MAX_BATCH_ROWS: u64 = 1000;

/// Which columns a scan returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Every column in the family.
    All,
    /// Row keys only; cell values are never transferred.
    RowKeyOnly,
    /// An explicit set of column names.
    Columns(Vec<String>),
}

impl Projection {
    /// Returns true when the scan fetches a restricted column set.
    pub fn is_restricted(&self) -> bool {
        matches!(self, Projection::Columns(_))
    }
}

/// An immutable execution plan for one range scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanPlan {
    /// Table to scan.
    pub table: String,
    /// Column family within the table.
    pub family: String,
    /// Inclusive start key, when pinned.
    pub start_key: Option<String>,
    /// Exclusive stop key, already adjusted from the query's inclusive
    /// bound.
    pub stop_key: Option<String>,
    /// True for a descending scan.
    pub reversed: bool,
    /// Column projection.
    pub projection: Projection,
    /// Row-count cap; `None` means unbounded.
    pub cap: Option<u64>,
    /// Root of the filter tree, pruned of empty groups.
    pub filter: Option<FilterNode>,
}

impl ScanPlan {
    /// Per-round-trip prefetch advice for the executor: the cap when small
    /// enough, never more than [`MAX_BATCH_ROWS`]. The cap itself is
    /// enforced by the caller counting delivered rows.
    pub fn batch_hint(&self) -> u64 {
        self.cap.unwrap_or(MAX_BATCH_ROWS).min(MAX_BATCH_ROWS)
    }

    /// Checks the start/stop ordering against the scan direction.
    ///
    /// With both keys present a forward scan requires `start <= stop` and
    /// a reversed scan `start >= stop`, in lexicographic byte order. The
    /// boundary case `start == stop` is accepted either way.
    pub(crate) fn validate_range(&self) -> PlannerResult<()> {
        let (Some(start), Some(stop)) = (self.start_key.as_deref(), self.stop_key.as_deref())
        else {
            return Ok(());
        };
        if start.is_empty() || stop.is_empty() {
            return Ok(());
        }
        let ordered = if self.reversed {
            start >= stop
        } else {
            start <= stop
        };
        if ordered {
            Ok(())
        } else {
            Err(PlannerError::range_order(start, stop, self.reversed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(start: Option<&str>, stop: Option<&str>, reversed: bool) -> ScanPlan {
        ScanPlan {
            table: "t".into(),
            family: "f".into(),
            start_key: start.map(Into::into),
            stop_key: stop.map(Into::into),
            reversed,
            projection: Projection::All,
            cap: None,
            filter: None,
        }
    }

    #[test]
    fn test_forward_range_order() {
        assert!(plan(Some("a"), Some("b"), false).validate_range().is_ok());
        assert!(plan(Some("a"), Some("a"), false).validate_range().is_ok());
        let err = plan(Some("b"), Some("a"), false).validate_range().unwrap_err();
        assert_eq!(err.code().code(), "SCANQL_RANGE_ORDER_VIOLATION");
    }

    #[test]
    fn test_reversed_range_order() {
        assert!(plan(Some("b"), Some("a"), true).validate_range().is_ok());
        assert!(plan(Some("a"), Some("a"), true).validate_range().is_ok());
        assert!(plan(Some("a"), Some("b"), true).validate_range().is_err());
    }

    #[test]
    fn test_half_open_ranges_always_valid() {
        assert!(plan(Some("z"), None, false).validate_range().is_ok());
        assert!(plan(None, Some("a"), false).validate_range().is_ok());
        assert!(plan(None, None, true).validate_range().is_ok());
    }

    #[test]
    fn test_batch_hint_caps_at_limit() {
        assert_eq!(plan(None, None, false).batch_hint(), MAX_BATCH_ROWS);

        let mut capped = plan(None, None, false);
        capped.cap = Some(10);
        assert_eq!(capped.batch_hint(), 10);

        capped.cap = Some(50_000);
        assert_eq!(capped.batch_hint(), MAX_BATCH_ROWS);
    }

    #[test]
    fn test_projection_restriction() {
        assert!(!Projection::All.is_restricted());
        assert!(!Projection::RowKeyOnly.is_restricted());
        assert!(Projection::Columns(vec!["a".into()]).is_restricted());
    }
}
