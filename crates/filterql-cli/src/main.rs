//! filterql CLI
//!
//! Command-line tool that compiles filter strings to parameterized SQL.

use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use filterql_cli::{CompileOptions, TargetDialect, compile, load_field_map};

/// Compile REST filter expressions to Spanner or PostgreSQL SQL.
#[derive(Parser)]
#[command(name = "filterql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file mapping filter names to columns and kinds.
    #[arg(short, long, env = "FILTERQL_FIELDS")]
    fields: PathBuf,

    /// SQL dialect to generate.
    #[arg(short, long, env = "FILTERQL_DIALECT", value_enum, default_value_t = TargetDialect::Spanner)]
    dialect: TargetDialect,

    /// Reject filters that do not reference an indexed field.
    #[arg(long)]
    require_indexed: bool,

    /// Also print the SQL with parameter values inlined (for reading only).
    #[arg(long)]
    inline: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// The filter, e.g. `status:eq:active,age:gte:30`.
    #[arg(default_value = "")]
    filter: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let fields = load_field_map(&cli.fields)?;
    debug!(filter = %cli.filter, "compiling filter");

    let options = CompileOptions {
        dialect: cli.dialect,
        require_indexed: cli.require_indexed,
        inline: cli.inline,
    };
    let compiled = compile(&cli.filter, &fields, options)?;

    println!("{}", serde_json::to_string_pretty(&compiled)?);
    Ok(())
}
