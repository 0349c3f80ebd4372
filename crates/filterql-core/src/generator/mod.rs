//! SQL generation from filter expression trees.
//!
//! [`SqlGenerator`] walks an [`ExpressionNode`] and emits a `WHERE` fragment
//! plus one bound parameter per placeholder. Placeholders are numbered from
//! 1 in traversal order on every call; the counter is local to the call, so a
//! generator can be shared between threads.
//!
//! ```rust
//! use filterql_core::ast::{Condition, ExpressionNode, Operator};
//! use filterql_core::generator::SpannerGenerator;
//! use filterql_core::value::SqlValue;
//!
//! let node = ExpressionNode::or(
//!     Condition::compare("Status", Operator::Eq, SqlValue::Text(String::from("active"))).into(),
//!     Condition::null_check("Status", Operator::IsNull).into(),
//! );
//! let (sql, params) = SpannerGenerator::new().generate_sql(Some(&node)).unwrap();
//! assert_eq!(sql, "`Status` = @p1 OR `Status` IS NULL");
//! assert_eq!(params["p1"], SqlValue::Text(String::from("active")));
//! ```

mod substitute;

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use tracing::debug;

use crate::ast::{Condition, ExpressionNode, MAX_DEPTH};
use crate::dialect::{Dialect, PostgresDialect, SpannerDialect};
use crate::error::GenerateError;
use crate::value::SqlValue;

pub use substitute::substitute_params;

/// One bound parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParam {
    /// The name the placeholder is bound under (`p1` or `$1`).
    pub name: String,
    /// The value.
    pub value: SqlValue,
}

/// Generated parameters in the shape the dialect binds them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoundParams {
    /// Ordered values for `$N` placeholders.
    Positional(Vec<SqlValue>),
    /// Values keyed by name for `@name` placeholders.
    Named(BTreeMap<String, SqlValue>),
}

impl BoundParams {
    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(values) => values.len(),
            Self::Named(values) => values.len(),
        }
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<SqlValue>> for BoundParams {
    fn from(values: Vec<SqlValue>) -> Self {
        Self::Positional(values)
    }
}

impl From<BTreeMap<String, SqlValue>> for BoundParams {
    fn from(values: BTreeMap<String, SqlValue>) -> Self {
        Self::Named(values)
    }
}

/// Dialect-generic SQL generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlGenerator<D> {
    dialect: D,
}

impl<D: Dialect> SqlGenerator<D> {
    /// Creates a generator for the given dialect.
    #[must_use]
    pub const fn new(dialect: D) -> Self {
        Self { dialect }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Generates SQL and parameters for a tree.
    ///
    /// `None` yields an empty string and no parameters.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::UnsupportedOperator`] if a condition lacks
    /// the operand its operator needs, and [`GenerateError::TooDeep`] for a
    /// tree deeper than [`MAX_DEPTH`]. Every tree the parser returns is
    /// within that depth.
    pub fn generate(
        &self,
        node: Option<&ExpressionNode>,
    ) -> Result<(String, Vec<QueryParam>), GenerateError> {
        let Some(node) = node else {
            return Ok((String::new(), Vec::new()));
        };

        let mut emitter = Emitter {
            dialect: &self.dialect,
            sql: String::new(),
            params: Vec::new(),
        };
        emitter.node(node, 0)?;

        debug!(
            dialect = self.dialect.name(),
            params = emitter.params.len(),
            "generated filter SQL"
        );
        Ok((emitter.sql, emitter.params))
    }
}

/// State of one generation pass.
struct Emitter<'d, D> {
    dialect: &'d D,
    sql: String,
    params: Vec<QueryParam>,
}

impl<D: Dialect> Emitter<'_, D> {
    fn node(&mut self, node: &ExpressionNode, depth: usize) -> Result<(), GenerateError> {
        if depth > MAX_DEPTH {
            return Err(GenerateError::TooDeep { limit: MAX_DEPTH });
        }

        match node {
            ExpressionNode::Condition(node) => self.condition(&node.condition),
            ExpressionNode::LogicalOp(node) => {
                self.node(&node.left, depth + 1)?;
                let _ = write!(self.sql, " {} ", node.operator.sql());
                self.node(&node.right, depth + 1)
            }
            ExpressionNode::Group(node) => {
                self.sql.push('(');
                self.node(&node.expression, depth + 1)?;
                self.sql.push(')');
                Ok(())
            }
        }
    }

    fn condition(&mut self, condition: &Condition) -> Result<(), GenerateError> {
        let field = self.dialect.quote_identifier(&condition.field);
        let operator = condition.operator;
        let unsupported = |reason| GenerateError::UnsupportedOperator {
            field: condition.field.clone(),
            operator,
            reason,
        };

        if operator.is_null_check() {
            let _ = write!(self.sql, "{field} {}", operator.sql());
        } else if operator.is_list() {
            if condition.values.is_empty() {
                return Err(unsupported("requires at least one value"));
            }
            let placeholders: Vec<String> = condition
                .values
                .iter()
                .map(|value| self.bind(value.clone()))
                .collect();
            let _ = write!(
                self.sql,
                "{field} {} ({})",
                operator.sql(),
                placeholders.join(", ")
            );
        } else {
            let Some(value) = &condition.value else {
                return Err(unsupported("requires a value"));
            };
            let placeholder = self.bind(value.clone());
            let _ = write!(self.sql, "{field} {} {placeholder}", operator.sql());
        }
        Ok(())
    }

    /// Records a parameter and returns its placeholder.
    fn bind(&mut self, value: SqlValue) -> String {
        let index = self.params.len() + 1;
        self.params.push(QueryParam {
            name: self.dialect.param_name(index),
            value,
        });
        self.dialect.placeholder(index)
    }
}

/// Generator for Spanner: `@pN` placeholders, parameters keyed by name.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpannerGenerator {
    inner: SqlGenerator<SpannerDialect>,
}

impl SpannerGenerator {
    /// Creates a Spanner generator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: SqlGenerator::new(SpannerDialect::new()),
        }
    }

    /// Generates SQL and named parameters.
    ///
    /// # Errors
    ///
    /// See [`SqlGenerator::generate`].
    pub fn generate_sql(
        &self,
        node: Option<&ExpressionNode>,
    ) -> Result<(String, BTreeMap<String, SqlValue>), GenerateError> {
        let (sql, params) = self.inner.generate(node)?;
        let named = params.into_iter().map(|p| (p.name, p.value)).collect();
        Ok((sql, named))
    }
}

/// Generator for PostgreSQL: `$N` placeholders, parameters in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresGenerator {
    inner: SqlGenerator<PostgresDialect>,
}

impl PostgresGenerator {
    /// Creates a PostgreSQL generator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: SqlGenerator::new(PostgresDialect::new()),
        }
    }

    /// Generates SQL and positional parameters.
    ///
    /// # Errors
    ///
    /// See [`SqlGenerator::generate`].
    pub fn generate_sql(
        &self,
        node: Option<&ExpressionNode>,
    ) -> Result<(String, Vec<SqlValue>), GenerateError> {
        let (sql, params) = self.inner.generate(node)?;
        let values = params.into_iter().map(|p| p.value).collect();
        Ok((sql, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(String::from(s))
    }

    fn sample() -> ExpressionNode {
        ExpressionNode::and(
            ExpressionNode::group(ExpressionNode::or(
                Condition::list("category", Operator::In, vec![text("books"), text("movies")])
                    .into(),
                Condition::compare("status", Operator::Eq, text("active")).into(),
            )),
            Condition::compare("price", Operator::Lt, text("100")).into(),
        )
    }

    #[test]
    fn test_none_generates_nothing() {
        let (sql, params) = SpannerGenerator::new().generate_sql(None).unwrap();
        assert!(sql.is_empty());
        assert!(params.is_empty());
        let (sql, params) = PostgresGenerator::new().generate_sql(None).unwrap();
        assert!(sql.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn test_spanner_named_params() {
        let (sql, params) = SpannerGenerator::new().generate_sql(Some(&sample())).unwrap();
        assert_eq!(
            sql,
            "(`category` IN (@p1, @p2) OR `status` = @p3) AND `price` < @p4"
        );
        assert_eq!(params.len(), 4);
        assert_eq!(params["p1"], text("books"));
        assert_eq!(params["p2"], text("movies"));
        assert_eq!(params["p3"], text("active"));
        assert_eq!(params["p4"], text("100"));
    }

    #[test]
    fn test_postgres_positional_params() {
        let (sql, params) = PostgresGenerator::new().generate_sql(Some(&sample())).unwrap();
        assert_eq!(
            sql,
            r#"("category" IN ($1, $2) OR "status" = $3) AND "price" < $4"#
        );
        assert_eq!(
            params,
            vec![text("books"), text("movies"), text("active"), text("100")]
        );
    }

    #[test]
    fn test_query_param_names() {
        let generator = SqlGenerator::new(SpannerDialect::new());
        let (_, params) = generator.generate(Some(&sample())).unwrap();
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["p1", "p2", "p3", "p4"]);

        let generator = SqlGenerator::new(PostgresDialect::new());
        let (_, params) = generator.generate(Some(&sample())).unwrap();
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["$1", "$2", "$3", "$4"]);
    }

    #[test]
    fn test_null_checks_bind_nothing() {
        let node = ExpressionNode::and(
            Condition::null_check("a", Operator::IsNull).into(),
            Condition::null_check("b", Operator::IsNotNull).into(),
        );
        let (sql, params) = PostgresGenerator::new().generate_sql(Some(&node)).unwrap();
        assert_eq!(sql, r#""a" IS NULL AND "b" IS NOT NULL"#);
        assert!(params.is_empty());
    }

    #[test]
    fn test_generation_is_repeatable() {
        let generator = SpannerGenerator::new();
        let tree = sample();
        let first = generator.generate_sql(Some(&tree)).unwrap();
        let second = generator.generate_sql(Some(&tree)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_operands_are_rejected() {
        let mut compare = Condition::compare("a", Operator::Gt, SqlValue::Int(1));
        compare.value = None;
        let err = SpannerGenerator::new()
            .generate_sql(Some(&compare.into()))
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnsupportedOperator {
                operator: Operator::Gt,
                ..
            }
        ));

        let empty = Condition::list("a", Operator::NotIn, Vec::new());
        assert!(
            PostgresGenerator::new()
                .generate_sql(Some(&empty.into()))
                .is_err()
        );
    }

    #[test]
    fn test_bound_params() {
        let positional = BoundParams::from(vec![SqlValue::Int(1)]);
        assert_eq!(positional.len(), 1);
        assert!(BoundParams::from(BTreeMap::new()).is_empty());
        assert_eq!(serde_json::to_string(&positional).unwrap(), "[1]");
    }

    fn chain(conditions: usize) -> ExpressionNode {
        let leaf = || ExpressionNode::from(Condition::null_check("a", Operator::IsNull));
        let mut tree = leaf();
        for _ in 1..conditions {
            tree = ExpressionNode::and(leaf(), tree);
        }
        tree
    }

    #[test]
    fn test_depth_limit() {
        let (sql, params) = SpannerGenerator::new()
            .generate_sql(Some(&chain(MAX_DEPTH + 1)))
            .unwrap();
        assert_eq!(sql.matches(" AND ").count(), MAX_DEPTH);
        assert!(params.is_empty());

        let err = PostgresGenerator::new()
            .generate_sql(Some(&chain(MAX_DEPTH + 2)))
            .unwrap_err();
        assert_eq!(err, GenerateError::TooDeep { limit: MAX_DEPTH });

        let mut nested = chain(1);
        for _ in 0..=MAX_DEPTH {
            nested = ExpressionNode::group(nested);
        }
        assert!(matches!(
            SpannerGenerator::new().generate_sql(Some(&nested)),
            Err(GenerateError::TooDeep { .. })
        ));
    }
}
