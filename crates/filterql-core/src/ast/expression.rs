//! Expression tree types.

use std::fmt;

use super::{LogicalOperator, Operator};
use crate::value::SqlValue;

/// A single resolved `field operator value?` predicate.
///
/// Exactly one of `value`, `values` or `is_null_op` carries the operand,
/// according to the operator. Use the constructors to keep that invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The column name (resolved from the wire-facing field name).
    pub field: String,
    /// The operator.
    pub operator: Operator,
    /// The operand of a comparison.
    pub value: Option<SqlValue>,
    /// The operands of `in`/`notin`.
    pub values: Vec<SqlValue>,
    /// Set for `isnull`/`isnotnull`.
    pub is_null_op: bool,
}

impl Condition {
    /// Creates a comparison (`eq`, `ne`, `gt`, `lt`, `gte`, `lte`).
    #[must_use]
    pub fn compare(field: impl Into<String>, operator: Operator, value: SqlValue) -> Self {
        Self {
            field: field.into(),
            operator,
            value: Some(value),
            values: Vec::new(),
            is_null_op: false,
        }
    }

    /// Creates a list membership test (`in`, `notin`).
    #[must_use]
    pub fn list(field: impl Into<String>, operator: Operator, values: Vec<SqlValue>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
            values,
            is_null_op: false,
        }
    }

    /// Creates a null check (`isnull`, `isnotnull`).
    #[must_use]
    pub fn null_check(field: impl Into<String>, operator: Operator) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
            values: Vec::new(),
            is_null_op: true,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.operator)?;
        if self.is_null_op {
            return Ok(());
        }
        if let Some(value) = &self.value {
            return write!(f, ":{value}");
        }
        f.write_str(":(")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

/// A leaf node holding one condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionNode {
    /// The condition.
    pub condition: Condition,
}

/// Two expressions joined by `AND` or `OR`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalOpNode {
    /// Left operand.
    pub left: Box<ExpressionNode>,
    /// The operator.
    pub operator: LogicalOperator,
    /// Right operand.
    pub right: Box<ExpressionNode>,
}

/// An explicitly parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    /// The inner expression.
    pub expression: Box<ExpressionNode>,
}

/// A filter expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    /// A single condition.
    Condition(ConditionNode),
    /// A binary logical operation.
    LogicalOp(LogicalOpNode),
    /// A parenthesized group.
    Group(GroupNode),
}

impl ExpressionNode {
    /// Creates a condition leaf.
    #[must_use]
    pub const fn condition(condition: Condition) -> Self {
        Self::Condition(ConditionNode { condition })
    }

    /// Creates a logical node.
    #[must_use]
    pub fn logical(left: Self, operator: LogicalOperator, right: Self) -> Self {
        Self::LogicalOp(LogicalOpNode {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Creates `left AND right`.
    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::logical(left, LogicalOperator::And, right)
    }

    /// Creates `left OR right`.
    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::logical(left, LogicalOperator::Or, right)
    }

    /// Wraps an expression in a group.
    #[must_use]
    pub fn group(expression: Self) -> Self {
        Self::Group(GroupNode {
            expression: Box::new(expression),
        })
    }

    /// Returns every condition in the tree, left to right.
    #[must_use]
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        self.collect_conditions(&mut out);
        out
    }

    fn collect_conditions<'a>(&'a self, out: &mut Vec<&'a Condition>) {
        match self {
            Self::Condition(node) => out.push(&node.condition),
            Self::LogicalOp(node) => {
                node.left.collect_conditions(out);
                node.right.collect_conditions(out);
            }
            Self::Group(node) => node.expression.collect_conditions(out),
        }
    }
}

/// Renders the tree back into filter syntax.
///
/// Parsing the output with a field map whose names map to themselves yields
/// the same tree, as long as no value contains a delimiter or surrounding
/// whitespace.
impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition(node) => write!(f, "{}", node.condition),
            Self::LogicalOp(node) => write!(
                f,
                "{}{}{}",
                node.left,
                node.operator.delimiter(),
                node.right
            ),
            Self::Group(node) => write!(f, "({})", node.expression),
        }
    }
}

impl From<Condition> for ExpressionNode {
    fn from(condition: Condition) -> Self {
        Self::condition(condition)
    }
}
