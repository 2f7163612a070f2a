use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a storage backend.
///
/// These never leave the core: `Storage` logs them and degrades to an empty
/// read or a dropped write.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("storage I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage backend lock poisoned")]
    Poisoned,
}

/// Failures loading a catalog document as a whole.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog must be a JSON array of records")]
    NotAnArray,
}

/// Why a single catalog record was skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("duplicate content_id {0:?}")]
    DuplicateId(String),
}
