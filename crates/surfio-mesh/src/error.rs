//! Mesh import errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while importing a mesh file.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The mesh file could not be opened or read.
    #[error("cannot open mesh file {}: {source}", path.display())]
    FileOpen {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
