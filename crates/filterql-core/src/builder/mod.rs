//! Fluent Query Builder
//!
//! Builds the same [`ExpressionNode`](crate::ast::ExpressionNode) trees the
//! parser does, without going through filter text. Column handles are typed,
//! so a value of the wrong type does not compile.
//!
//! Operators chain left to right with no precedence of their own, exactly
//! like `,` and `|` in a filter. Use [`PartialQueryClause::group`] where
//! grouping matters.
//!
//! # Example
//!
//! ```rust
//! use filterql_core::builder::{PartialQueryClause, ident};
//! use filterql_core::generator::SpannerGenerator;
//!
//! let clause = PartialQueryClause::new()
//!     .group(ident::<i64>("ID").equal(10).or().ident::<i64>("ID").greater_than(2))
//!     .and()
//!     .ident::<String>("Name")
//!     .equal("test");
//!
//! let (sql, params) = SpannerGenerator::new()
//!     .generate_sql(Some(clause.node()))
//!     .unwrap();
//! assert_eq!(sql, "(`ID` = @p1 OR `ID` > @p2) AND `Name` = @p3");
//! assert_eq!(params.len(), 3);
//! ```

mod clause;
mod ident;

pub use clause::{PartialQueryClause, QueryClause};
pub use ident::{Ident, ident};
