//! Filter Parser
//!
//! A hand-written recursive descent parser for the filter grammar:
//!
//! ```text
//! filter    := "" | expr
//! expr      := term (("," | "|") expr)?
//! term      := condition | "(" expr ")"
//! condition := field ":" op (":" value)?
//! value     := scalar | "(" list ")"
//! list      := item ("," item)*
//! ```
//!
//! Recursion is bounded by [`MAX_DEPTH`](crate::ast::MAX_DEPTH): a chain may
//! hold that many conditions, and groups nest to roughly half of it. Deeper
//! input fails with [`ParseError::TooDeep`].

mod convert;
#[allow(clippy::module_inception)]
mod parser;

pub use crate::error::ParseError;
pub use parser::{Parser, parse_filter};
