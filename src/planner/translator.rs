//! Predicate translation.
//!
//! Walks the predicate tree and produces the store-native filter tree plus
//! the row-key range updates implied by the `startRowKey`/`stopRowKey`
//! pseudo-columns. Numeric comparisons are delegated to the range-regex
//! compiler; everything else maps onto exact, substring, or user-supplied
//! regex matchers.
//!
//! Traversal visits the right subtree before the left, which matches the
//! left-associative chains the upstream parser builds for `a AND b AND c`.
//! A disjunction reached at the root or as a right child opens an `AnyOf`
//! scope, and every comparison translated while that scope is open —
//! including the left sibling subtree — attaches to it. Each recursive
//! step returns the updated scope instead of appending to a shared list,
//! so sibling branches never alias one another.

use std::collections::HashSet;

use regex::Regex;

use crate::numeric::{self, RangeOp};

use super::ast::{CompareOp, PredicateNode, ROW_KEY, START_ROW_KEY, STOP_ROW_KEY};
use super::errors::{PlannerError, PlannerResult};
use super::filter::{Comparator, FilterNode, MissingPolicy, Operand};

/// Value prefix that marks the remainder as a user-supplied regex.
pub const REGEX_VALUE_PREFIX: &str = "REG#";

/// Everything a predicate tree translates into.
#[derive(Debug, Default)]
pub struct Translation {
    /// Inclusive start key, when the predicate pinned one.
    pub start_key: Option<String>,
    /// Stop key, already adjusted to the store's exclusive bound.
    pub stop_key: Option<String>,
    /// Children of the plan's root conjunction, in translation order.
    pub filters: Vec<FilterNode>,
    /// Columns referenced by filters, recorded when the projection is
    /// restricted so the builder can fetch them alongside the select list.
    pub referenced_columns: Vec<String>,
}

/// Translates predicate trees for one scan.
pub struct PredicateTranslator<'a> {
    family: &'a str,
    projection_restricted: bool,
    reversed: bool,
    allow_missing: &'a HashSet<String>,
}

impl<'a> PredicateTranslator<'a> {
    /// Creates a translator for the given family and scan direction.
    ///
    /// `projection_restricted` is true when the query names an explicit
    /// column set; `allow_missing` lists columns whose absence keeps the
    /// row instead of dropping it.
    pub fn new(
        family: &'a str,
        projection_restricted: bool,
        reversed: bool,
        allow_missing: &'a HashSet<String>,
    ) -> Self {
        Self {
            family,
            projection_restricted,
            reversed,
            allow_missing,
        }
    }

    /// Translates a predicate tree into range updates and filter nodes.
    pub fn translate(&self, predicate: &PredicateNode) -> PlannerResult<Translation> {
        let mut out = Translation::default();
        out.filters = match predicate {
            PredicateNode::Or(..) => {
                let children = self.walk(predicate, Vec::new(), &mut out)?;
                vec![FilterNode::AnyOf(children)]
            }
            _ => self.walk(predicate, Vec::new(), &mut out)?,
        };
        Ok(out)
    }

    /// Walks one subtree, returning the scope with the subtree's filters
    /// appended.
    fn walk(
        &self,
        node: &PredicateNode,
        scope: Vec<FilterNode>,
        out: &mut Translation,
    ) -> PlannerResult<Vec<FilterNode>> {
        match node {
            PredicateNode::Compare { column, op, value } => {
                let mut scope = scope;
                if let Some(filter) = self.classify_leaf(column, *op, value, out)? {
                    scope.push(filter);
                }
                Ok(scope)
            }
            PredicateNode::And(left, right) | PredicateNode::Or(left, right) => {
                if matches!(**right, PredicateNode::Or(..)) {
                    // The right-hand disjunction opens a scope that the
                    // left sibling joins before it closes.
                    let inner = self.walk(right, Vec::new(), out)?;
                    let inner = self.walk(left, inner, out)?;
                    let mut scope = scope;
                    scope.push(FilterNode::AnyOf(inner));
                    Ok(scope)
                } else {
                    let scope = self.walk(right, scope, out)?;
                    self.walk(left, scope, out)
                }
            }
        }
    }

    /// Classifies one comparison leaf. Range pseudo-columns update the
    /// translation's keys and emit no filter.
    fn classify_leaf(
        &self,
        raw_column: &str,
        op: CompareOp,
        value: &str,
        out: &mut Translation,
    ) -> PlannerResult<Option<FilterNode>> {
        let column = raw_column.trim_matches('`');

        if column == START_ROW_KEY {
            out.start_key = Some(value.to_string());
            return Ok(None);
        }
        if column == STOP_ROW_KEY {
            out.stop_key = Some(adjust_stop_key(value, self.reversed)?);
            return Ok(None);
        }

        if self.projection_restricted {
            out.referenced_columns.push(column.to_string());
        }

        let (comparator, operand) = match op {
            CompareOp::Eq | CompareOp::Ne => {
                let comparator = if op == CompareOp::Eq {
                    Comparator::Equal
                } else {
                    Comparator::NotEqual
                };
                let operand = if let Some(pattern) = value.strip_prefix(REGEX_VALUE_PREFIX) {
                    Regex::new(pattern)
                        .map_err(|err| PlannerError::invalid_regex(column, err))?;
                    Operand::Pattern(pattern.to_string())
                } else if let Ok(pattern) = numeric::compile(value, RangeOp::Eq) {
                    // Numeric equality tolerates trailing zero fractions in
                    // the stored text, so it matches by pattern.
                    Operand::Pattern(pattern)
                } else {
                    Operand::Exact(value.to_string())
                };
                (comparator, operand)
            }
            CompareOp::Like => (Comparator::Equal, Operand::Substring(value.to_string())),
            CompareOp::NotLike => (Comparator::NotEqual, Operand::Substring(value.to_string())),
            CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge => {
                let range_op = match op {
                    CompareOp::Lt => RangeOp::Lt,
                    CompareOp::Le => RangeOp::Le,
                    CompareOp::Gt => RangeOp::Gt,
                    _ => RangeOp::Ge,
                };
                let pattern = numeric::compile(value, range_op).map_err(|_| {
                    PlannerError::unsupported_comparison(column, op.symbol(), value)
                })?;
                (Comparator::Equal, Operand::Pattern(pattern))
            }
        };

        let filter = if column == ROW_KEY {
            FilterNode::RowMatch {
                comparator,
                operand,
            }
        } else {
            FilterNode::ColumnMatch {
                family: self.family.to_string(),
                column: column.to_string(),
                comparator,
                operand,
                missing_policy: if self.allow_missing.contains(column) {
                    MissingPolicy::PassRow
                } else {
                    MissingPolicy::FailRow
                },
            }
        };
        Ok(Some(filter))
    }
}

/// Moves the final character of `value` one code point toward the scan
/// direction, turning the query's inclusive stop bound into the store's
/// exclusive one: up for forward scans, down for reversed scans.
///
/// The adjustment is a plain code-point shift. It can leave the printable
/// range (`'~'` becomes `'\u{7f}'`), and a shift into an unencodable code
/// point (surrogates, past U+10FFFF, below U+0000) is rejected rather than
/// wrapped.
fn adjust_stop_key(value: &str, reversed: bool) -> PlannerResult<String> {
    let mut chars: Vec<char> = value.chars().collect();
    let Some(last) = chars.pop() else {
        return Ok(String::new());
    };
    let code = last as u32;
    let shifted = if reversed {
        code.checked_sub(1)
    } else {
        code.checked_add(1)
    };
    let adjusted = shifted
        .and_then(char::from_u32)
        .ok_or_else(|| PlannerError::invalid_stop_key(value))?;
    chars.push(adjusted);
    Ok(chars.into_iter().collect())
}
