//! Path collection documents.
//!
//! The datastore lists paths as
//! `{"service-function-paths": {"service-function-path": [...]}}`.
//! Decoding also accepts a bare JSON array of paths.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use sfc_types::ServiceFunctionPath;
use tracing::debug;

use crate::error::{PathMgrError, PathMgrResult};
use crate::tables::{PATHS_CONTAINER, PATH_LIST};

/// Decodes a path collection document.
///
/// # Errors
///
/// Returns [`PathMgrError::Decode`] for malformed JSON or paths (including a
/// hop that names neither a service function nor a forwarder), and
/// [`PathMgrError::InvalidArgument`] if the document has no path collection.
pub fn decode_paths(input: &str) -> PathMgrResult<Vec<ServiceFunctionPath>> {
    let value: Value = serde_json::from_str(input)?;

    let list = match value {
        list @ Value::Array(_) => list,
        Value::Object(mut document) => match document.remove(PATHS_CONTAINER) {
            Some(Value::Object(mut container)) => container
                .remove(PATH_LIST)
                .unwrap_or_else(|| Value::Array(Vec::new())),
            Some(_) => {
                return Err(PathMgrError::invalid_argument(
                    PATHS_CONTAINER,
                    "expected an object",
                ))
            }
            None => {
                return Err(PathMgrError::invalid_argument(
                    PATHS_CONTAINER,
                    "document has no path collection",
                ))
            }
        },
        _ => {
            return Err(PathMgrError::invalid_argument(
                PATHS_CONTAINER,
                "expected a collection object or an array of paths",
            ))
        }
    };

    Ok(serde_json::from_value(list)?)
}

/// Encodes paths as a pretty-printed collection document.
pub fn encode_paths(paths: &[ServiceFunctionPath]) -> PathMgrResult<String> {
    let mut container = Map::new();
    container.insert(PATH_LIST.to_string(), serde_json::to_value(paths)?);

    let mut document = Map::new();
    document.insert(PATHS_CONTAINER.to_string(), Value::Object(container));

    Ok(serde_json::to_string_pretty(&document)?)
}

/// Reads and decodes a path collection document from a file.
pub fn read_paths(file: &Path) -> PathMgrResult<Vec<ServiceFunctionPath>> {
    let input = fs::read_to_string(file).map_err(|e| PathMgrError::io(file, e))?;
    let paths = decode_paths(&input)?;
    debug!(file = %file.display(), paths = paths.len(), "Read path document");
    Ok(paths)
}

/// Encodes paths and writes them to a file, replacing its contents.
pub fn write_paths(file: &Path, paths: &[ServiceFunctionPath]) -> PathMgrResult<()> {
    let mut output = encode_paths(paths)?;
    output.push('\n');
    fs::write(file, output).map_err(|e| PathMgrError::io(file, e))?;
    debug!(file = %file.display(), paths = paths.len(), "Wrote path document");
    Ok(())
}
