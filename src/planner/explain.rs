//! Human-readable plan rendering.
//!
//! Output is deterministic: the same plan always renders to identical
//! text.

use std::fmt;

use super::errors::PlannerError;
use super::filter::{Comparator, FilterNode, Operand};
use super::plan::{Projection, ScanPlan};

/// Explain output for a compiled (or rejected) query.
#[derive(Debug, Clone)]
pub struct ExplainPlan {
    /// Whether compilation succeeded.
    pub accepted: bool,
    /// The compiled plan, when accepted.
    pub plan: Option<ScanPlan>,
    /// Rejection code, when rejected.
    pub rejection_code: Option<String>,
    /// Rejection reason, when rejected.
    pub rejection_reason: Option<String>,
}

impl ExplainPlan {
    /// Creates explain output from a compiled plan.
    pub fn from_plan(plan: &ScanPlan) -> Self {
        Self {
            accepted: true,
            plan: Some(plan.clone()),
            rejection_code: None,
            rejection_reason: None,
        }
    }

    /// Creates explain output from a rejection.
    pub fn from_error(err: &PlannerError) -> Self {
        Self {
            accepted: false,
            plan: None,
            rejection_code: Some(err.code().code().to_string()),
            rejection_reason: Some(err.message().to_string()),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== SCAN PLAN ===")?;

        if !self.accepted {
            writeln!(f, "Status: REJECTED")?;
            if let Some(code) = &self.rejection_code {
                writeln!(f, "Error Code: {code}")?;
            }
            if let Some(reason) = &self.rejection_reason {
                writeln!(f, "Reason: {reason}")?;
            }
            return Ok(());
        }

        let plan = self.plan.as_ref().expect("accepted explain carries a plan");
        writeln!(f, "Status: ACCEPTED")?;
        writeln!(f, "Table: {}#{}", plan.table, plan.family)?;
        writeln!(
            f,
            "Direction: {}",
            if plan.reversed { "reversed" } else { "forward" }
        )?;
        if let Some(start) = &plan.start_key {
            writeln!(f, "Start Key: {start}")?;
        }
        if let Some(stop) = &plan.stop_key {
            writeln!(f, "Stop Key (exclusive): {stop}")?;
        }
        match &plan.projection {
            Projection::All => writeln!(f, "Projection: *")?,
            Projection::RowKeyOnly => writeln!(f, "Projection: rowKey")?,
            Projection::Columns(columns) => {
                writeln!(f, "Projection: {}", columns.join(", "))?
            }
        }
        if let Some(cap) = plan.cap {
            writeln!(f, "Limit: {cap}")?;
        }
        writeln!(f, "Batch Hint: {} rows", plan.batch_hint())?;
        match &plan.filter {
            None => writeln!(f, "Filter: none")?,
            Some(root) => {
                writeln!(f, "Filter:")?;
                write_filter(f, root, 1)?;
            }
        }
        Ok(())
    }
}

fn write_filter(f: &mut fmt::Formatter<'_>, node: &FilterNode, indent: usize) -> fmt::Result {
    let pad = "  ".repeat(indent);
    match node {
        FilterNode::AllOf(children) => {
            writeln!(f, "{pad}- all of:")?;
            for child in children {
                write_filter(f, child, indent + 1)?;
            }
            Ok(())
        }
        FilterNode::AnyOf(children) => {
            writeln!(f, "{pad}- any of:")?;
            for child in children {
                write_filter(f, child, indent + 1)?;
            }
            Ok(())
        }
        FilterNode::RowMatch {
            comparator,
            operand,
        } => {
            writeln!(
                f,
                "{pad}- rowKey {} {}",
                comparator_text(comparator),
                operand_text(operand)
            )
        }
        FilterNode::ColumnMatch {
            column,
            comparator,
            operand,
            missing_policy,
            ..
        } => {
            writeln!(
                f,
                "{pad}- {column} {} {} (missing: {})",
                comparator_text(comparator),
                operand_text(operand),
                match missing_policy {
                    super::filter::MissingPolicy::FailRow => "fail row",
                    super::filter::MissingPolicy::PassRow => "pass row",
                }
            )
        }
        FilterNode::KeyOnly => writeln!(f, "{pad}- keys only"),
    }
}

fn comparator_text(comparator: &Comparator) -> &'static str {
    match comparator {
        Comparator::Equal => "matches",
        Comparator::NotEqual => "does not match",
    }
}

fn operand_text(operand: &Operand) -> String {
    match operand {
        Operand::Exact(text) => format!("exact '{text}'"),
        Operand::Substring(text) => format!("substring '{text}'"),
        Operand::Pattern(pattern) => format!("pattern /{pattern}/"),
    }
}
