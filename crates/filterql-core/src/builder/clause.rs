//! Clauses and partial clauses of the fluent query builder.

use super::Ident;
use crate::ast::{ExpressionNode, LogicalOpNode, LogicalOperator};

/// A complete filter expression built through the fluent API.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryClause {
    root: ExpressionNode,
}

impl QueryClause {
    /// Wraps an existing expression tree.
    #[must_use]
    pub const fn new(root: ExpressionNode) -> Self {
        Self { root }
    }

    /// Starts an `AND` with the next operand.
    #[must_use]
    pub fn and(self) -> PartialQueryClause {
        PartialQueryClause {
            pending: Some((self.root, LogicalOperator::And)),
        }
    }

    /// Starts an `OR` with the next operand.
    #[must_use]
    pub fn or(self) -> PartialQueryClause {
        PartialQueryClause {
            pending: Some((self.root, LogicalOperator::Or)),
        }
    }

    /// Returns the expression tree.
    #[must_use]
    pub const fn node(&self) -> &ExpressionNode {
        &self.root
    }

    /// Consumes the clause and returns the expression tree.
    #[must_use]
    pub fn into_node(self) -> ExpressionNode {
        self.root
    }
}

impl From<QueryClause> for ExpressionNode {
    fn from(clause: QueryClause) -> Self {
        clause.root
    }
}

/// A clause waiting for its next operand.
///
/// Either empty (the operand becomes the root) or holding the tree built so
/// far together with the operator that joins the operand to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialQueryClause {
    pending: Option<(ExpressionNode, LogicalOperator)>,
}

impl PartialQueryClause {
    /// Creates an empty partial clause.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Returns a typed column handle that completes this clause.
    #[must_use]
    pub fn ident<T>(self, column: impl Into<String>) -> Ident<T> {
        Ident::new(column, self)
    }

    /// Completes this clause with a parenthesized sub-clause.
    #[must_use]
    pub fn group(self, clause: QueryClause) -> QueryClause {
        self.complete(ExpressionNode::group(clause.root))
    }

    /// Converts this clause into a typed accessor, such as one generated by
    /// `#[derive(Filterable)]`.
    #[must_use]
    pub fn with<F: From<Self>>(self) -> F {
        F::from(self)
    }

    /// Completes this clause with `operand`.
    ///
    /// The operand is attached below the right spine of the pending tree,
    /// descending through logical nodes but never into a group. The result
    /// has the shape the parser builds for the same filter text.
    #[must_use]
    pub fn complete(self, operand: ExpressionNode) -> QueryClause {
        let root = match self.pending {
            None => operand,
            Some((tree, operator)) => graft(tree, operator, operand),
        };
        QueryClause { root }
    }
}

fn graft(tree: ExpressionNode, operator: LogicalOperator, operand: ExpressionNode) -> ExpressionNode {
    match tree {
        ExpressionNode::LogicalOp(LogicalOpNode {
            left,
            operator: existing,
            right,
        }) => ExpressionNode::LogicalOp(LogicalOpNode {
            left,
            operator: existing,
            right: Box::new(graft(*right, operator, operand)),
        }),
        leaf => ExpressionNode::logical(leaf, operator, operand),
    }
}
