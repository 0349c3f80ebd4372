//! Google Cloud Spanner dialect.

use super::Dialect;

/// Spanner: backtick-quoted identifiers and named `@pN` parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpannerDialect;

impl SpannerDialect {
    /// Creates a new Spanner dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SpannerDialect {
    fn name(&self) -> &'static str {
        "spanner"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn placeholder(&self, index: usize) -> String {
        format!("@p{index}")
    }

    fn param_name(&self, index: usize) -> String {
        format!("p{index}")
    }
}
