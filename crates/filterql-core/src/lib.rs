//! # filterql-core
//!
//! A filter expression language for REST-style query parameters, compiled to
//! parameterized Spanner or PostgreSQL `WHERE` fragments.
//!
//! This crate provides:
//! - A hand-written lexer and recursive descent parser for filters such as
//!   `(status:eq:active|status:eq:pending),user_id:notin:(1,2)`
//! - A typed fluent builder producing the same expression trees
//! - A SQL generator with dialect-specific quoting and placeholders
//!
//! Comma means AND and pipe means OR. Both bind equally and chain left to
//! right; only parentheses in the filter group conditions.
//!
//! ## Parsing and generating
//!
//! ```rust
//! use filterql_core::generator::PostgresGenerator;
//! use filterql_core::parser::parse_filter;
//! use filterql_core::schema::{FieldInfo, FieldKind, FieldMap};
//! use filterql_core::value::SqlValue;
//!
//! let mut fields = FieldMap::new();
//! fields.insert(String::from("status"), FieldInfo::new("Status", FieldKind::String));
//! fields.insert(String::from("user_id"), FieldInfo::new("UserId", FieldKind::Int64));
//!
//! let tree = parse_filter("status:eq:active,user_id:notin:(1,2)", &fields).unwrap();
//! let (sql, params) = PostgresGenerator::new().generate_sql(tree.as_ref()).unwrap();
//!
//! assert_eq!(sql, r#""Status" = $1 AND "UserId" NOT IN ($2, $3)"#);
//! assert_eq!(params[1], SqlValue::Int(1));
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values never appear in the generated SQL; each one is bound to its own
//! placeholder:
//!
//! ```rust
//! use filterql_core::builder::ident;
//! use filterql_core::generator::SpannerGenerator;
//!
//! let clause = ident::<String>("Name").equal("'; DROP TABLE users; --");
//! let (sql, params) = SpannerGenerator::new().generate_sql(Some(clause.node())).unwrap();
//!
//! assert_eq!(sql, "`Name` = @p1");
//! assert_eq!(params.len(), 1);
//! ```

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod lexer;
pub mod parser;
pub mod schema;
pub mod value;

pub use ast::{ExpressionNode, Operator};
pub use builder::{Ident, PartialQueryClause, QueryClause, ident};
pub use error::{GenerateError, LexError, ParseError};
pub use generator::{PostgresGenerator, SpannerGenerator};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{Parser, parse_filter};
pub use schema::{FieldInfo, FieldKind, FieldMap, Filterable, HasFieldKind};
pub use value::{SqlValue, ToSqlValue};
