//! Error types for the command line front-end.

use std::path::PathBuf;

use filterql_core::{GenerateError, ParseError};

/// Errors that can occur while compiling a filter from the command line.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The field map file could not be read.
    #[error("Failed to read field map '{path}': {source}")]
    Io {
        /// Path to the field map.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The field map file is not a valid field map document.
    #[error("Invalid field map '{path}': {source}")]
    FieldMap {
        /// Path to the field map.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// The filter could not be parsed.
    #[error("Invalid filter: {0}")]
    Parse(#[from] ParseError),

    /// SQL could not be generated from the parsed filter.
    #[error("SQL generation failed: {0}")]
    Generate(#[from] GenerateError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for command line operations.
pub type Result<T> = std::result::Result<T, CliError>;
