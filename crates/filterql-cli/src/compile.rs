//! Compiling filter strings to SQL for a chosen dialect.

use filterql_core::generator::{BoundParams, PostgresGenerator, SpannerGenerator, substitute_params};
use filterql_core::parser::Parser;
use filterql_core::schema::FieldMap;
use filterql_core::Lexer;
use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// The SQL dialect to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TargetDialect {
    /// Google Cloud Spanner (`@pN` named parameters).
    #[default]
    Spanner,
    /// PostgreSQL (`$N` positional parameters).
    Postgres,
}

/// Options controlling compilation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Target dialect.
    pub dialect: TargetDialect,
    /// Reject filters that reference no indexed field.
    pub require_indexed: bool,
    /// Also render the SQL with values inlined.
    pub inline: bool,
}

/// The result of compiling one filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledFilter {
    /// The `WHERE` fragment. Empty for an empty filter.
    pub sql: String,
    /// The bound parameters.
    pub params: BoundParams,
    /// The fragment with values inlined, for reading only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<String>,
}

/// Parses `filter` against `fields` and generates SQL.
///
/// # Errors
///
/// Returns the parse or generation error.
pub fn compile(filter: &str, fields: &FieldMap, options: CompileOptions) -> Result<CompiledFilter> {
    let tree = Parser::new(Lexer::new(filter), fields)?
        .require_indexed_field(options.require_indexed)
        .parse()?;

    let (sql, params) = match options.dialect {
        TargetDialect::Spanner => {
            let (sql, params) = SpannerGenerator::new().generate_sql(tree.as_ref())?;
            (sql, BoundParams::from(params))
        }
        TargetDialect::Postgres => {
            let (sql, params) = PostgresGenerator::new().generate_sql(tree.as_ref())?;
            (sql, BoundParams::from(params))
        }
    };
    info!(dialect = ?options.dialect, params = params.len(), "compiled filter");

    let inline = options.inline.then(|| substitute_params(&sql, &params));
    Ok(CompiledFilter {
        sql,
        params,
        inline,
    })
}
