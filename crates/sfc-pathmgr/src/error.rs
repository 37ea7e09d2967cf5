//! Error types for path management operations.
//!
//! All errors implement `std::error::Error` via `thiserror`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for path management operations.
pub type PathMgrResult<T> = Result<T, PathMgrError>;

/// Errors that can occur while sequencing or editing paths.
#[derive(Debug, Error)]
pub enum PathMgrError {
    /// An argument failed validation (missing or out-of-range field).
    #[error("Invalid argument {field}: {message}")]
    InvalidArgument {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// No path with this name is held by the session.
    #[error("Service function path '{name}' not found")]
    PathNotFound {
        /// The path name.
        name: String,
    },

    /// A path with this name already exists in the session.
    #[error("Service function path '{name}' already exists")]
    DuplicatePath {
        /// The path name.
        name: String,
    },

    /// A hop position is past the end of the path.
    #[error("Hop position {position} out of range for path '{name}' ({len} hops)")]
    HopOutOfRange {
        /// The path name.
        name: String,
        /// The requested position.
        position: usize,
        /// Number of hops in the path.
        len: usize,
    },

    /// A path document could not be decoded or encoded.
    #[error("Malformed path document: {source}")]
    Decode {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Reading or writing a path document failed.
    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl PathMgrError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a path not found error.
    pub fn path_not_found(name: impl Into<String>) -> Self {
        Self::PathNotFound { name: name.into() }
    }

    /// Creates an IO error for the given file.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error describes bad caller input that should be
    /// shown to the user for correction rather than retried.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            PathMgrError::InvalidArgument { .. }
                | PathMgrError::DuplicatePath { .. }
                | PathMgrError::HopOutOfRange { .. }
                | PathMgrError::Decode { .. }
        )
    }
}
