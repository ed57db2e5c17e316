//! Query plan builder.
//!
//! Top-level entry of the compiler: consumes a [`QueryRequest`] and
//! produces a finished [`ScanPlan`]. Building is deterministic and
//! all-or-nothing — a query either compiles fully or is rejected before
//! any store access happens.

use std::collections::HashSet;

use super::ast::{OrderDirection, QueryRequest, ROW_KEY};
use super::errors::{PlannerError, PlannerResult};
use super::filter::FilterNode;
use super::plan::{Projection, ScanPlan};
use super::translator::PredicateTranslator;

/// Compiles query requests into scan plans.
#[derive(Debug, Default)]
pub struct QueryPlanBuilder {
    allow_missing: HashSet<String>,
}

impl QueryPlanBuilder {
    /// Creates a builder with an empty allow-missing list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns whose absence keeps a row instead of dropping it when the
    /// column is filtered on.
    pub fn allow_missing(
        mut self,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.allow_missing = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the scan plan for `request`.
    pub fn build(&self, request: &QueryRequest) -> PlannerResult<ScanPlan> {
        let (table, family) = split_table_source(&request.table_source)?;

        let projection = resolve_projection(&request.select);
        let reversed = request.order_by == Some(OrderDirection::Desc);

        let cap = request.limit;
        if cap == Some(0) {
            return Err(PlannerError::invalid_limit());
        }

        let mut root: Vec<FilterNode> = Vec::new();
        if projection == Projection::RowKeyOnly {
            root.push(FilterNode::KeyOnly);
        }

        let mut start_key = None;
        let mut stop_key = None;
        let mut projection = projection;

        if let Some(predicate) = &request.predicate {
            let translator = PredicateTranslator::new(
                family,
                projection.is_restricted(),
                reversed,
                &self.allow_missing,
            );
            let translation = translator.translate(predicate)?;
            start_key = translation.start_key;
            stop_key = translation.stop_key;
            root.extend(translation.filters);
            if let Projection::Columns(columns) = &mut projection {
                merge_columns(columns, translation.referenced_columns);
            }
        }

        let plan = ScanPlan {
            table: table.to_string(),
            family: family.to_string(),
            start_key,
            stop_key,
            reversed,
            projection,
            cap,
            filter: FilterNode::AllOf(root).prune(),
        };
        plan.validate_range()?;
        Ok(plan)
    }
}

/// Splits a `table#family` source into its two non-empty halves.
fn split_table_source(source: &str) -> PlannerResult<(&str, &str)> {
    match source.split_once('#') {
        Some((table, family)) if !table.is_empty() && !family.is_empty() => {
            Ok((table, family))
        }
        _ => Err(PlannerError::invalid_table_source(source)),
    }
}

/// Resolves the select list into a projection, stripping back-tick quoting.
fn resolve_projection(select: &[String]) -> Projection {
    if select.len() == 1 {
        let item = select[0].trim_matches('`');
        if item == "*" {
            return Projection::All;
        }
        if item == ROW_KEY {
            return Projection::RowKeyOnly;
        }
    }
    Projection::Columns(
        select
            .iter()
            .map(|item| item.trim_matches('`').to_string())
            .collect(),
    )
}

/// Appends filter-referenced columns to the projection, skipping names
/// already present.
fn merge_columns(columns: &mut Vec<String>, referenced: Vec<String>) {
    for column in referenced {
        if !columns.contains(&column) {
            columns.push(column);
        }
    }
}
