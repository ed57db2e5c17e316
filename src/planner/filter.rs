//! Store-native filter tree.
//!
//! Mirrors the predicate tree but speaks the store's vocabulary:
//! conjunction/disjunction groups, row-level matchers, and column-level
//! matchers with a missing-column policy. The external scan executor
//! translates these nodes into its native filter primitives.

use serde::Serialize;

/// Match polarity for a row or column matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Equal,
    NotEqual,
}

/// What a matcher compares the stored value against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// Byte-for-byte equality with the given text.
    Exact(String),
    /// Case-sensitive containment of the given text.
    Substring(String),
    /// Full-match regex over the stored text.
    Pattern(String),
}

/// Whether a row lacking the filtered column is kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// The row is excluded when the column is absent (default).
    FailRow,
    /// The row passes the filter when the column is absent.
    PassRow,
}

/// A node of the filter tree shipped to the scan executor.
///
/// An empty `AllOf`/`AnyOf` group means "no filter" and must be pruned
/// with [`FilterNode::prune`] before the plan is handed out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterNode {
    /// Every child must pass.
    AllOf(Vec<FilterNode>),
    /// At least one child must pass.
    AnyOf(Vec<FilterNode>),
    /// Matcher over the row key itself.
    RowMatch {
        comparator: Comparator,
        operand: Operand,
    },
    /// Matcher over a single column's value.
    ColumnMatch {
        family: String,
        column: String,
        comparator: Comparator,
        operand: Operand,
        missing_policy: MissingPolicy,
    },
    /// Strips cell values from the result, returning keys only.
    KeyOnly,
}

impl FilterNode {
    /// Recursively removes empty groups; returns `None` when nothing
    /// remains.
    pub fn prune(self) -> Option<FilterNode> {
        match self {
            FilterNode::AllOf(children) => {
                let kept: Vec<FilterNode> =
                    children.into_iter().filter_map(FilterNode::prune).collect();
                if kept.is_empty() {
                    None
                } else {
                    Some(FilterNode::AllOf(kept))
                }
            }
            FilterNode::AnyOf(children) => {
                let kept: Vec<FilterNode> =
                    children.into_iter().filter_map(FilterNode::prune).collect();
                if kept.is_empty() {
                    None
                } else {
                    Some(FilterNode::AnyOf(kept))
                }
            }
            leaf => Some(leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_exact(text: &str) -> FilterNode {
        FilterNode::RowMatch {
            comparator: Comparator::Equal,
            operand: Operand::Exact(text.to_string()),
        }
    }

    #[test]
    fn test_empty_groups_prune_to_none() {
        assert_eq!(FilterNode::AllOf(vec![]).prune(), None);
        assert_eq!(FilterNode::AnyOf(vec![]).prune(), None);
        assert_eq!(
            FilterNode::AllOf(vec![FilterNode::AnyOf(vec![])]).prune(),
            None
        );
    }

    #[test]
    fn test_nested_empty_group_dropped() {
        let tree = FilterNode::AllOf(vec![FilterNode::AnyOf(vec![]), row_exact("a")]);
        assert_eq!(tree.prune(), Some(FilterNode::AllOf(vec![row_exact("a")])));
    }

    #[test]
    fn test_leaves_survive_pruning() {
        assert_eq!(FilterNode::KeyOnly.prune(), Some(FilterNode::KeyOnly));
        assert_eq!(row_exact("x").prune(), Some(row_exact("x")));
    }
}
