//! Loading field maps from JSON documents.

use std::path::Path;

use filterql_core::schema::FieldMap;
use tracing::debug;

use crate::error::{CliError, Result};

/// Reads a field map from a JSON file.
///
/// The document maps each filter name to its column, kind and index flag:
///
/// ```json
/// {
///   "user_id": { "name": "UserId", "kind": "int64", "indexed": true },
///   "tags": { "name": "Tags", "kind": { "list": "string" } }
/// }
/// ```
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be read and
/// [`CliError::FieldMap`] if it is not a valid field map.
pub fn load_field_map(path: &Path) -> Result<FieldMap> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let fields: FieldMap = serde_json::from_str(&text).map_err(|source| CliError::FieldMap {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), fields = fields.len(), "loaded field map");
    Ok(fields)
}
