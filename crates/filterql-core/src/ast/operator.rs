//! Condition and logical operators.

use std::fmt;

/// A condition operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `eq`: equal.
    Eq,
    /// `ne`: not equal.
    Ne,
    /// `gt`: greater than.
    Gt,
    /// `lt`: less than.
    Lt,
    /// `gte`: greater than or equal.
    Gte,
    /// `lte`: less than or equal.
    Lte,
    /// `in`: member of a value list.
    In,
    /// `notin`: not a member of a value list.
    NotIn,
    /// `isnull`: the column is NULL.
    IsNull,
    /// `isnotnull`: the column is not NULL.
    IsNotNull,
}

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Lt,
        Self::Gte,
        Self::Lte,
        Self::In,
        Self::NotIn,
        Self::IsNull,
        Self::IsNotNull,
    ];

    /// Looks up an operator by its filter name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the filter-syntax name of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::In => "in",
            Self::NotIn => "notin",
            Self::IsNull => "isnull",
            Self::IsNotNull => "isnotnull",
        }
    }

    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }

    /// Returns true for operators taking a single scalar value.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Gt | Self::Lt | Self::Gte | Self::Lte
        )
    }

    /// Returns true for operators taking a value list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Returns true for operators taking no value.
    #[must_use]
    pub const fn is_null_check(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator joining two expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    /// `,` in a filter, `AND` in SQL.
    And,
    /// `|` in a filter, `OR` in SQL.
    Or,
}

impl LogicalOperator {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }

    /// Returns the filter-syntax delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        match self {
            Self::And => ',',
            Self::Or => '|',
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}
