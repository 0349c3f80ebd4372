//! Typed column handles.

use std::marker::PhantomData;

use super::{PartialQueryClause, QueryClause};
use crate::ast::{Condition, ExpressionNode, Operator};
use crate::value::ToSqlValue;

/// A column bound to a Rust value type.
///
/// Each method consumes the handle and completes the partial clause it was
/// created from.
#[derive(Debug, Clone)]
pub struct Ident<T> {
    column: String,
    partial: PartialQueryClause,
    _type: PhantomData<fn() -> T>,
}

impl<T> Ident<T> {
    /// Creates a handle for `column` completing `partial`.
    #[must_use]
    pub fn new(column: impl Into<String>, partial: PartialQueryClause) -> Self {
        Self {
            column: column.into(),
            partial,
            _type: PhantomData,
        }
    }

    /// Returns the column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// `column IS NULL`.
    #[must_use]
    pub fn is_null(self) -> QueryClause {
        let condition = Condition::null_check(self.column, Operator::IsNull);
        self.partial.complete(ExpressionNode::condition(condition))
    }

    /// `column IS NOT NULL`.
    #[must_use]
    pub fn is_not_null(self) -> QueryClause {
        let condition = Condition::null_check(self.column, Operator::IsNotNull);
        self.partial.complete(ExpressionNode::condition(condition))
    }
}

impl<T: ToSqlValue> Ident<T> {
    fn compare(self, operator: Operator, value: T) -> QueryClause {
        let condition = Condition::compare(self.column, operator, value.to_sql_value());
        self.partial.complete(ExpressionNode::condition(condition))
    }

    fn any_of<I, V>(self, single: Operator, list: Operator, values: I) -> QueryClause
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        let mut values: Vec<_> = values
            .into_iter()
            .map(|v| Into::<T>::into(v).to_sql_value())
            .collect();
        let condition = if values.len() == 1 {
            let value = values.remove(0);
            Condition::compare(self.column, single, value)
        } else {
            Condition::list(self.column, list, values)
        };
        self.partial.complete(ExpressionNode::condition(condition))
    }

    /// `column = value`.
    #[must_use]
    pub fn equal(self, value: impl Into<T>) -> QueryClause {
        self.compare(Operator::Eq, value.into())
    }

    /// `column = value` for one value, `column IN (...)` for several.
    ///
    /// No values build an empty `IN` list, which generation rejects with
    /// [`GenerateError::UnsupportedOperator`](crate::GenerateError::UnsupportedOperator).
    #[must_use]
    pub fn equal_any<I, V>(self, values: I) -> QueryClause
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        self.any_of(Operator::Eq, Operator::In, values)
    }

    /// `column <> value`.
    #[must_use]
    pub fn not_equal(self, value: impl Into<T>) -> QueryClause {
        self.compare(Operator::Ne, value.into())
    }

    /// `column <> value` for one value, `column NOT IN (...)` for several.
    ///
    /// Like [`equal_any`](Self::equal_any), no values fail at generation.
    #[must_use]
    pub fn not_equal_any<I, V>(self, values: I) -> QueryClause
    where
        I: IntoIterator<Item = V>,
        V: Into<T>,
    {
        self.any_of(Operator::Ne, Operator::NotIn, values)
    }

    /// `column > value`.
    #[must_use]
    pub fn greater_than(self, value: impl Into<T>) -> QueryClause {
        self.compare(Operator::Gt, value.into())
    }

    /// `column >= value`.
    #[must_use]
    pub fn greater_than_eq(self, value: impl Into<T>) -> QueryClause {
        self.compare(Operator::Gte, value.into())
    }

    /// `column < value`.
    #[must_use]
    pub fn less_than(self, value: impl Into<T>) -> QueryClause {
        self.compare(Operator::Lt, value.into())
    }

    /// `column <= value`.
    #[must_use]
    pub fn less_than_eq(self, value: impl Into<T>) -> QueryClause {
        self.compare(Operator::Lte, value.into())
    }
}

/// Starts a new clause at a typed column.
#[must_use]
pub fn ident<T>(column: impl Into<String>) -> Ident<T> {
    Ident::new(column, PartialQueryClause::new())
}
