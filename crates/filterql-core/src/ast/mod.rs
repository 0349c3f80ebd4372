//! Abstract Syntax Tree (AST) types for filter expressions.

mod expression;
mod operator;

pub use expression::{Condition, ConditionNode, ExpressionNode, GroupNode, LogicalOpNode};
pub use operator::{LogicalOperator, Operator};

/// Deepest node the parser builds and the generator renders.
///
/// The root sits at depth 0. Each `,`/`|` in a chain and each group adds a
/// level, so a flat chain may hold up to this many conditions.
pub const MAX_DEPTH: usize = 256;
