//! Command line front-end for filterql.
//!
//! Turns a filter string and a JSON field map into a parameterized SQL
//! `WHERE` fragment for Spanner or PostgreSQL.
//!
//! # CLI Usage
//!
//! ```bash
//! # Spanner, named parameters
//! filterql --fields fields.json '(status:eq:active|status:eq:pending),user_id:notin:(1,2)'
//!
//! # PostgreSQL, with the values inlined for reading
//! filterql --fields fields.json --dialect postgres --inline 'age:gte:30'
//! ```

pub mod compile;
pub mod error;
pub mod fields;

pub use compile::{CompileOptions, CompiledFilter, TargetDialect, compile};
pub use error::{CliError, Result};
pub use fields::load_field_map;
