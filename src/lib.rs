//! scanql - a query-to-scan-plan compiler for wide-column stores
//!
//! The target store scans rows in key order and filters them with byte
//! equality, substring, and regex matchers; it has no numeric comparator.
//! scanql compiles a parsed query into an immutable [`planner::ScanPlan`]
//! (key range, direction, projection, cap, filter tree), synthesizing
//! regexes that express decimal inequalities over string-encoded values.

pub mod cli;
pub mod executor;
pub mod numeric;
pub mod observability;
pub mod planner;
