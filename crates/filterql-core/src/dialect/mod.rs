//! SQL Dialect support.
//!
//! Spanner and PostgreSQL differ in how identifiers are quoted and how
//! parameter placeholders are written. This module provides a trait for that
//! dialect-specific behavior.

mod postgres;
mod spanner;

pub use postgres::PostgresDialect;
pub use spanner::SpannerDialect;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character (e.g., `"` for PostgreSQL, `` ` `` for Spanner).
    fn identifier_quote(&self) -> char;

    /// Quotes an identifier, doubling any embedded quote character.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let escaped = name.replace(quote, &format!("{quote}{quote}"));
        format!("{quote}{escaped}{quote}")
    }

    /// Returns the placeholder for the 1-based parameter `index`.
    fn placeholder(&self, index: usize) -> String;

    /// Returns the name the parameter at `index` is bound under.
    ///
    /// Defaults to the placeholder itself.
    fn param_name(&self, index: usize) -> String {
        self.placeholder(index)
    }
}
