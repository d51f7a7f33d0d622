//! IGES writer errors.

use thiserror::Error;

/// Errors that can occur while writing an IGES file.
#[derive(Debug, Error)]
pub enum IgesError {
    /// The compound holds no faces, so the model has no entities.
    #[error("compound holds no faces to add to the model")]
    EmptyCompound,

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for IGES operations.
pub type Result<T> = std::result::Result<T, IgesError>;
