//! Error types for lexing, parsing and SQL generation.

use crate::ast::Operator;
use crate::lexer::Span;

/// Errors produced while tokenizing a filter string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A condition value opened a second level of parentheses.
    #[error(
        "Nested parentheses are not allowed within a single condition segment. \
         Found near character {position} of {input}"
    )]
    NestedParentheses {
        /// 1-based character position of the offending `(`.
        position: usize,
        /// The full filter string.
        input: String,
    },
}

/// Errors produced while parsing a filter string into an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The lexer rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The condition is not of the form `field:operator[:value]`.
    #[error("invalid condition '{condition}': {reason}")]
    InvalidConditionFormat {
        /// The raw condition text.
        condition: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The operator is not one of the supported filter operators.
    #[error("unknown operator '{operator}' in condition '{condition}'")]
    UnknownOperator {
        /// The operator as written (trimmed, lowercased).
        operator: String,
        /// The raw condition text.
        condition: String,
    },

    /// The operator requires a value but none was given.
    #[error("operator '{operator}' requires a value in condition '{condition}'")]
    MissingValue {
        /// The operator.
        operator: Operator,
        /// The raw condition text.
        condition: String,
    },

    /// The field name is not present in the field map.
    #[error("'{field}' is not a filterable field but was included in condition '{condition}'")]
    InvalidFieldName {
        /// The field name as written.
        field: String,
        /// The raw condition text.
        condition: String,
    },

    /// The token stream does not fit the grammar.
    #[error("{message} at position {span}")]
    UnexpectedToken {
        /// The error message.
        message: String,
        /// The location of the offending token.
        span: Span,
    },

    /// An expression was required but the current token cannot start one.
    #[error("{message} at position {span}")]
    ExpectedExpression {
        /// The error message.
        message: String,
        /// The location of the offending token.
        span: Span,
    },

    /// A value could not be converted to the field's kind, or a value list is malformed.
    #[error("invalid value '{value}' in condition '{condition}': {reason}")]
    InvalidValueFormat {
        /// The raw value text.
        value: String,
        /// The raw condition text.
        condition: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The filter chains or nests more levels than the parser accepts.
    #[error("filter nests deeper than {limit} levels at position {span}")]
    TooDeep {
        /// The maximum depth.
        limit: usize,
        /// The location of the token that crossed the limit.
        span: Span,
    },

    /// The parser requires an indexed field and the filter references none.
    #[error("filter must contain at least one indexed field")]
    NoIndexedField,
}

impl ParseError {
    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>, span: Span) -> Self {
        Self::UnexpectedToken {
            message: message.into(),
            span,
        }
    }

    /// Creates an "expected expression" error.
    #[must_use]
    pub fn expected_expression(message: impl Into<String>, span: Span) -> Self {
        Self::ExpectedExpression {
            message: message.into(),
            span,
        }
    }
}

/// Errors produced while generating SQL from an expression tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// The condition's operator cannot be rendered with the values it carries.
    #[error("unsupported operator for SQL generation: {operator} on field '{field}' {reason}")]
    UnsupportedOperator {
        /// The column the condition applies to.
        field: String,
        /// The operator.
        operator: Operator,
        /// What the operator needed.
        reason: &'static str,
    },

    /// The tree is deeper than the generator renders.
    #[error("expression tree is deeper than {limit} levels")]
    TooDeep {
        /// The maximum depth.
        limit: usize,
    },
}
