//! Query AST handed over by the upstream expression parser.
//!
//! The parser that turns a query string into this tree is an external
//! collaborator; scanql consumes the tree, it never builds one from text.
//! The serde derives define the JSON wire form used when the AST crosses a
//! process boundary (and by the `scanql` CLI).

use serde::{Deserialize, Serialize};

/// Pseudo-column that names the row key in projections and predicates.
pub const ROW_KEY: &str = "rowKey";
/// Pseudo-column that pins the scan's inclusive start key.
pub const START_ROW_KEY: &str = "startRowKey";
/// Pseudo-column that pins the scan's stop key (inclusive in the query,
/// adjusted to the store's exclusive bound during translation).
pub const STOP_ROW_KEY: &str = "stopRowKey";

/// Comparison operators allowed in predicate leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    NotLike,
}

impl CompareOp {
    /// Returns the operator's query-language spelling.
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Like => "like",
            CompareOp::NotLike => "not like",
        }
    }

    /// Returns true for `<`, `<=`, `>`, `>=`.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge
        )
    }
}

/// A node in the boolean predicate tree.
///
/// The tree is binary and immutable once built. Leaves carry the raw
/// literal text exactly as written, with quoting already stripped by the
/// upstream parser. The closed enum makes unsupported expression shapes
/// unrepresentable rather than a runtime cast failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateNode {
    /// Conjunction of two subtrees.
    And(Box<PredicateNode>, Box<PredicateNode>),
    /// Disjunction of two subtrees.
    Or(Box<PredicateNode>, Box<PredicateNode>),
    /// A single column comparison.
    Compare {
        column: String,
        op: CompareOp,
        value: String,
    },
}

impl PredicateNode {
    /// Builds a conjunction node.
    pub fn and(left: PredicateNode, right: PredicateNode) -> Self {
        PredicateNode::And(Box::new(left), Box::new(right))
    }

    /// Builds a disjunction node.
    pub fn or(left: PredicateNode, right: PredicateNode) -> Self {
        PredicateNode::Or(Box::new(left), Box::new(right))
    }

    /// Builds a comparison leaf.
    pub fn compare(
        column: impl Into<String>,
        op: CompareOp,
        value: impl Into<String>,
    ) -> Self {
        PredicateNode::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

/// Scan direction requested by the row-key order-by clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// A parsed query as delivered by the upstream parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Table source of the form `table#family`.
    pub table_source: String,
    /// Select items: `*`, `rowKey`, or explicit column names
    /// (back-tick-quoted when they contain special characters).
    pub select: Vec<String>,
    /// Optional row-key ordering; absent means ascending.
    #[serde(default)]
    pub order_by: Option<OrderDirection>,
    /// Optional row-count cap.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Optional predicate tree from the `where` clause.
    #[serde(default)]
    pub predicate: Option<PredicateNode>,
}

impl QueryRequest {
    /// Creates a request selecting all columns with no predicate.
    pub fn new(table_source: impl Into<String>) -> Self {
        Self {
            table_source: table_source.into(),
            select: vec!["*".to_string()],
            order_by: None,
            limit: None,
            predicate: None,
        }
    }

    /// Replaces the select list.
    pub fn with_select(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.select = items.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the row-key ordering.
    pub fn with_order(mut self, direction: OrderDirection) -> Self {
        self.order_by = Some(direction);
        self
    }

    /// Sets the row-count cap.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the predicate tree.
    pub fn with_predicate(mut self, predicate: PredicateNode) -> Self {
        self.predicate = Some(predicate);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = QueryRequest::new("vehicle#can")
            .with_select(["did", "speed"])
            .with_order(OrderDirection::Desc)
            .with_limit(10);

        assert_eq!(request.table_source, "vehicle#can");
        assert_eq!(request.select, vec!["did", "speed"]);
        assert_eq!(request.order_by, Some(OrderDirection::Desc));
        assert_eq!(request.limit, Some(10));
        assert!(request.predicate.is_none());
    }

    #[test]
    fn test_relational_classification() {
        assert!(CompareOp::Lt.is_relational());
        assert!(CompareOp::Ge.is_relational());
        assert!(!CompareOp::Eq.is_relational());
        assert!(!CompareOp::Like.is_relational());
    }

    #[test]
    fn test_predicate_json_shape() {
        let node = PredicateNode::and(
            PredicateNode::compare("speed", CompareOp::Gt, "18"),
            PredicateNode::compare("did", CompareOp::Eq, "abc"),
        );
        let json = serde_json::to_value(&node).unwrap();
        let back: PredicateNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"table_source": "t#f", "select": ["*"]}"#).unwrap();
        assert!(request.order_by.is_none());
        assert!(request.limit.is_none());
        assert!(request.predicate.is_none());
    }
}
