//! STEP writer errors.

use thiserror::Error;

/// Errors that can occur while writing a STEP file.
#[derive(Debug, Error)]
pub enum StepError {
    /// The compound holds no faces, so there is nothing to transfer.
    #[error("compound holds no faces to transfer")]
    EmptyCompound,

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for STEP operations.
pub type Result<T> = std::result::Result<T, StepError>;
