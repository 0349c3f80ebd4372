//! Filter parser implementation.

use tracing::debug;

use super::convert::convert_value;
use crate::ast::{Condition, ExpressionNode, LogicalOperator, MAX_DEPTH, Operator};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::schema::{FieldInfo, FieldMap};
use crate::value::SqlValue;

/// Filter parser.
///
/// Builds an [`ExpressionNode`] from a token stream, resolving field names
/// through a [`FieldMap`]. `,` and `|` bind equally; each operator takes the
/// rest of the chain as its right operand, so `a,b|c` parses as
/// `a AND (b OR c)` without an explicit group. Only parentheses in the filter
/// text produce [`ExpressionNode::Group`] nodes.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    fields: &'a FieldMap,
    current: Token,
    peek: Token,
    require_indexed: bool,
    has_indexed_field: bool,
}

impl<'a> Parser<'a> {
    /// Creates a parser and reads the first two tokens.
    ///
    /// # Errors
    ///
    /// Returns the lexer error if either of the first two tokens cannot be
    /// scanned.
    pub fn new(mut lexer: Lexer<'a>, fields: &'a FieldMap) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        let peek = lexer.next_token()?;
        Ok(Self {
            lexer,
            fields,
            current,
            peek,
            require_indexed: false,
            has_indexed_field: false,
        })
    }

    /// Requires a non-empty filter to reference at least one indexed field.
    #[must_use]
    pub const fn require_indexed_field(mut self, require: bool) -> Self {
        self.require_indexed = require;
        self
    }

    /// Parses the whole filter.
    ///
    /// Returns `Ok(None)` for an empty filter.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the filter is malformed, references an
    /// unknown field, carries a value of the wrong type, or nests past
    /// [`MAX_DEPTH`].
    pub fn parse(&mut self) -> Result<Option<ExpressionNode>, ParseError> {
        if self.current.is_eof() && self.peek.is_eof() {
            return Ok(None);
        }

        let expression = self.parse_expression(0)?;

        if !self.peek.is_eof() {
            return Err(ParseError::unexpected(
                format!(
                    "Unexpected characters '{}' (type: {}) found after the end of the query",
                    self.peek.kind.lexeme(),
                    self.peek.kind.name()
                ),
                self.peek.span,
            ));
        }

        if self.require_indexed && !self.has_indexed_field {
            return Err(ParseError::NoIndexedField);
        }

        debug!(input = self.lexer.input(), "parsed filter");
        Ok(Some(expression))
    }

    /// Moves to the next token.
    fn advance(&mut self) -> Result<(), ParseError> {
        let next = self.lexer.next_token()?;
        self.current = std::mem::replace(&mut self.peek, next);
        Ok(())
    }

    /// Advances if the peek token matches, errors otherwise.
    fn expect_peek(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if &self.peek.kind == kind {
            return self.advance();
        }
        Err(ParseError::unexpected(
            format!(
                "expected next token to be {}, got {} instead",
                kind.name(),
                self.peek.kind.name()
            ),
            self.peek.span,
        ))
    }

    /// Parses a prefix expression followed by any `,`/`|` chain.
    ///
    /// `depth` is the depth of the returned node. The operand is counted one
    /// level deeper since a chain may follow it.
    fn parse_expression(&mut self, depth: usize) -> Result<ExpressionNode, ParseError> {
        let left = self.parse_operand(depth + 1)?;

        if self.peek.is_logical_operator() {
            self.advance()?;
            return self.parse_infix(left, depth);
        }

        Ok(left)
    }

    /// Parses a condition or a group sitting at `depth`.
    fn parse_operand(&mut self, depth: usize) -> Result<ExpressionNode, ParseError> {
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                span: self.current.span,
            });
        }

        match &self.current.kind {
            TokenKind::Condition(_) => self.parse_condition(),
            TokenKind::LeftParen => self.parse_group(depth),
            other => Err(ParseError::expected_expression(
                format!(
                    "Unexpected token '{}' (type: {}) at the beginning of an expression",
                    other.lexeme(),
                    other.name()
                ),
                self.current.span,
            )),
        }
    }

    /// Parses the right operand of the operator at the current token.
    fn parse_infix(
        &mut self,
        left: ExpressionNode,
        depth: usize,
    ) -> Result<ExpressionNode, ParseError> {
        let operator = match self.current.kind {
            TokenKind::Comma => LogicalOperator::And,
            TokenKind::Pipe => LogicalOperator::Or,
            ref other => {
                return Err(ParseError::unexpected(
                    format!(
                        "Expected a logical operator (',' for AND, '|' for OR) but found '{}' (type: {})",
                        other.lexeme(),
                        other.name()
                    ),
                    self.current.span,
                ));
            }
        };

        self.advance()?;
        let right = self.parse_expression(depth + 1)?;
        Ok(ExpressionNode::logical(left, operator, right))
    }

    /// Parses `( expression )` as a group at `depth`.
    fn parse_group(&mut self, depth: usize) -> Result<ExpressionNode, ParseError> {
        self.advance()?;

        if self.current.kind == TokenKind::RightParen {
            return Err(ParseError::expected_expression(
                "Empty groups '()' are not allowed",
                self.current.span,
            ));
        }

        let expression = self.parse_expression(depth + 1)?;
        self.expect_peek(&TokenKind::RightParen)?;
        Ok(ExpressionNode::group(expression))
    }

    /// Parses the `field:operator[:value]` text of the current token.
    fn parse_condition(&mut self) -> Result<ExpressionNode, ParseError> {
        let text = String::from(self.current.kind.lexeme());
        let parts: Vec<&str> = text.splitn(3, ':').collect();

        if parts.len() < 2 {
            return Err(ParseError::InvalidConditionFormat {
                condition: text.clone(),
                reason: String::from("a condition must have at least field:operator"),
            });
        }

        let field_name = parts[0].trim();
        if field_name.is_empty() {
            return Err(ParseError::InvalidConditionFormat {
                condition: text.clone(),
                reason: String::from("field name cannot be empty"),
            });
        }

        let Some(info) = self.fields.get(field_name) else {
            return Err(ParseError::InvalidFieldName {
                field: String::from(field_name),
                condition: text.clone(),
            });
        };
        if info.indexed {
            self.has_indexed_field = true;
        }

        let operator_name = parts[1].trim().to_lowercase();
        let Some(operator) = Operator::from_name(&operator_name) else {
            return Err(ParseError::UnknownOperator {
                operator: operator_name,
                condition: text.clone(),
            });
        };

        let raw_value = parts.get(2).copied();
        let condition = if operator.is_null_check() {
            if let Some(value) = raw_value.filter(|v| !v.trim().is_empty()) {
                return Err(ParseError::InvalidConditionFormat {
                    condition: text.clone(),
                    reason: format!("operator '{operator}' does not take a value, but got '{value}'"),
                });
            }
            Condition::null_check(&info.name, operator)
        } else {
            let Some(raw_value) = raw_value else {
                return Err(ParseError::MissingValue {
                    operator,
                    condition: text.clone(),
                });
            };
            if operator.is_list() {
                let values = parse_value_list(raw_value.trim(), operator, info, &text)?;
                Condition::list(&info.name, operator, values)
            } else {
                let value = convert_value(raw_value.trim(), &info.kind, &text)?;
                Condition::compare(&info.name, operator, value)
            }
        };

        Ok(ExpressionNode::condition(condition))
    }
}

/// Parses the `(v1,v2,...)` operand of `in`/`notin`.
fn parse_value_list(
    raw: &str,
    operator: Operator,
    info: &FieldInfo,
    condition: &str,
) -> Result<Vec<SqlValue>, ParseError> {
    let invalid = |reason: String| ParseError::InvalidValueFormat {
        value: String::from(raw),
        condition: String::from(condition),
        reason,
    };

    let Some(inner) = raw.strip_prefix('(').and_then(|r| r.strip_suffix(')')) else {
        return Err(invalid(format!(
            "value for '{operator}' must be in parentheses, e.g., (v1,v2)"
        )));
    };
    if inner.is_empty() {
        return Err(invalid(format!("value list for '{operator}' cannot be empty")));
    }

    let kind = info.kind.element().unwrap_or(&info.kind);
    inner
        .split(',')
        .map(str::trim)
        .map(|item| {
            if item.is_empty() {
                return Err(invalid(format!(
                    "empty value in list for operator '{operator}'"
                )));
            }
            convert_value(item, kind, condition)
        })
        .collect()
}

/// Parses a filter string against a field map.
///
/// # Errors
///
/// Returns a `ParseError` if the filter cannot be tokenized or parsed.
pub fn parse_filter(input: &str, fields: &FieldMap) -> Result<Option<ExpressionNode>, ParseError> {
    Parser::new(Lexer::new(input), fields)?.parse()
}
