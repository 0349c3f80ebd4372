//! Filter Lexer/Tokenizer
//!
//! Splits a filter string into delimiters (`(`, `)`, `,`, `|`) and raw
//! condition chunks. No whitespace is skipped between tokens.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
