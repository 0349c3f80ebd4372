//! Filter tokenizer implementation.

use tracing::trace;

use super::{Span, Token, TokenKind};
use crate::error::LexError;

/// A lexer that tokenizes a filter string.
///
/// Tokens are produced lazily, one per [`Lexer::next_token`] call. The lexer
/// only holds a cursor into the input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The filter string.
    input: &'a str,
    /// The current byte position.
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the filter string being tokenized.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the byte at the current position without advancing.
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Scans the next token.
    ///
    /// Once the input is exhausted every further call yields `Eof`.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::NestedParentheses`] when a condition value opens a
    /// second level of parentheses.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let Some(byte) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, Span::new(start, start)));
        };

        let kind = match byte {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b',' => TokenKind::Comma,
            b'|' => TokenKind::Pipe,
            _ => return self.scan_condition(),
        };
        self.pos += 1;
        trace!(token = kind.name(), start, "lexed delimiter");
        Ok(Token::new(kind, Span::new(start, self.pos)))
    }

    /// Scans a condition chunk up to the next top-level `,`, `|` or `)`.
    ///
    /// A single level of parentheses is kept inside the chunk so value lists
    /// such as `in:(a,b)` stay intact. A `)` that would close more than the
    /// chunk opened ends the chunk instead; it belongs to an enclosing group.
    fn scan_condition(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let mut depth = 0_usize;

        while let Some(byte) = self.peek() {
            match byte {
                b'(' => {
                    depth += 1;
                    if depth > 1 {
                        return Err(LexError::NestedParentheses {
                            position: self.pos + 1,
                            input: String::from(self.input),
                        });
                    }
                }
                b')' if depth > 0 => depth -= 1,
                b')' | b',' | b'|' if depth == 0 => break,
                _ => {}
            }
            self.pos += 1;
        }

        let text = &self.input[start..self.pos];
        trace!(condition = text, start, "lexed condition");
        Ok(Token::new(
            TokenKind::Condition(String::from(text)),
            Span::new(start, self.pos),
        ))
    }

    /// Tokenizes the entire input and returns all tokens, ending with `Eof`.
    ///
    /// # Errors
    ///
    /// Returns the first lexer error encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn cond(text: &str) -> TokenKind {
        TokenKind::Condition(String::from(text))
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("a:isnull");
        assert!(!lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
        assert!(lexer.next_token().unwrap().is_eof());
    }

    #[test]
    fn test_single_condition() {
        assert_eq!(
            token_kinds("name:eq:John"),
            vec![cond("name:eq:John"), TokenKind::Eof]
        );
        assert_eq!(
            token_kinds("status:isnull"),
            vec![cond("status:isnull"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_comma_and_pipe() {
        assert_eq!(
            token_kinds("name:eq:John,age:gte:30|name:eq:Jane"),
            vec![
                cond("name:eq:John"),
                TokenKind::Comma,
                cond("age:gte:30"),
                TokenKind::Pipe,
                cond("name:eq:Jane"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_group_with_value_list() {
        assert_eq!(
            token_kinds("(category:in:(books,movies)|status:eq:active),price:lt:100"),
            vec![
                TokenKind::LeftParen,
                cond("category:in:(books,movies)"),
                TokenKind::Pipe,
                cond("status:eq:active"),
                TokenKind::RightParen,
                TokenKind::Comma,
                cond("price:lt:100"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_value_list_closing_group() {
        assert_eq!(
            token_kinds("(status:eq:active|category:in:(books,movies)),price:lt:100"),
            vec![
                TokenKind::LeftParen,
                cond("status:eq:active"),
                TokenKind::Pipe,
                cond("category:in:(books,movies)"),
                TokenKind::RightParen,
                TokenKind::Comma,
                cond("price:lt:100"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_value_with_spaces_and_dashes() {
        assert_eq!(
            token_kinds("name:eq:John Doe"),
            vec![cond("name:eq:John Doe"), TokenKind::Eof]
        );
        assert_eq!(
            token_kinds("category:in:(sci-fi,non-fiction)"),
            vec![cond("category:in:(sci-fi,non-fiction)"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_arbitrary_text_is_a_condition() {
        assert_eq!(token_kinds("1=1"), vec![cond("1=1"), TokenKind::Eof]);
    }

    #[test]
    fn test_spans() {
        let tokens = Lexer::new("(a:isnull)").tokenize().unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 1));
        assert_eq!(tokens[1].span, Span::new(1, 9));
        assert_eq!(tokens[2].span, Span::new(9, 10));
        assert_eq!(tokens[3].span, Span::new(10, 10));
    }

    #[test]
    fn test_nested_parentheses_rejected() {
        let err = Lexer::new("category:in:(value,(value,value))")
            .tokenize()
            .unwrap_err();
        assert!(matches!(err, LexError::NestedParentheses { position: 20, .. }));
    }

    #[test]
    fn test_nested_parentheses_position() {
        let err = Lexer::new("field:op:(val(nested))").tokenize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Nested parentheses are not allowed within a single condition segment. \
             Found near character 14 of field:op:(val(nested))"
        );
    }

    #[test]
    fn test_multibyte_values() {
        assert_eq!(
            token_kinds("name:eq:Zoë,city:eq:Köln"),
            vec![
                cond("name:eq:Zoë"),
                TokenKind::Comma,
                cond("city:eq:Köln"),
                TokenKind::Eof,
            ]
        );
    }
}
