//! Error types for the storage layer.

use entity_actor::FrameworkError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures below the protocol layer: the table actors or the snapshot file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A table actor is gone or refused the request.
    #[error("storage engine error: {0}")]
    Engine(#[from] FrameworkError),

    #[error("snapshot I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// A snapshot key that is not `<Class>.<id>` with a known class.
    #[error("unrecognised snapshot key: {0}")]
    UnknownClass(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| StorageError::Io { path, source }
    }
}
