//! Token types for the filter lexer.

use super::Span;

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input
    Eof,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// , (logical AND)
    Comma,
    /// | (logical OR)
    Pipe,
    /// A raw `field:operator[:value]` chunk, captured verbatim.
    Condition(String),
}

impl TokenKind {
    /// Returns the source text of the token.
    ///
    /// End of input has no text and yields an empty string.
    #[must_use]
    pub fn lexeme(&self) -> &str {
        match self {
            Self::Eof => "",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Comma => ",",
            Self::Pipe => "|",
            Self::Condition(text) => text,
        }
    }

    /// Returns the name of the token type, used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Eof => "Eof",
            Self::LeftParen => "LeftParen",
            Self::RightParen => "RightParen",
            Self::Comma => "Comma",
            Self::Pipe => "Pipe",
            Self::Condition(_) => "Condition",
        }
    }
}

/// A token with its span in the filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the filter string.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this token joins two expressions (`,` or `|`).
    #[must_use]
    pub const fn is_logical_operator(&self) -> bool {
        matches!(self.kind, TokenKind::Comma | TokenKind::Pipe)
    }
}
