//! Error types for project persistence.

use thiserror::Error;

use crate::model::ProjectId;

/// Errors reported by a persistence backend.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The store could not be reached
    #[error("Store unreachable: {0}")]
    Unreachable(String),

    /// The store refused the operation
    #[error("Store rejected the request: {0}")]
    Rejected(String),

    /// No project with this id
    #[error("Project not found: {0}")]
    NotFound(ProjectId),

    /// I/O error on the local project file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Project file could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local project file is from a newer version
    #[error("Project file version {found} is newer than supported version {supported}")]
    VersionTooNew {
        /// Version in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },
}
