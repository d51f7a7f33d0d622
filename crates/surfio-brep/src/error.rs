//! Kernel error type.

use surfio_nurbs::{Direction, SurfaceError};
use thiserror::Error;

/// Errors raised by the B-rep kernel.
#[derive(Debug, Error)]
pub enum BrepError {
    /// No surfaces were supplied to the converter.
    #[error("no surfaces to convert")]
    EmptyInput,

    /// A surface failed validation before reaching the kernel.
    #[error("surface {index} is invalid")]
    InvalidSurface {
        /// Position of the surface in the input list.
        index: usize,
        /// The underlying validation failure.
        #[source]
        source: SurfaceError,
    },

    /// Pole and weight arrays must both hold `n_u * n_v` entries.
    #[error("pole grid mismatch: expected {expected} entries, got {actual}")]
    GridMismatch {
        /// `n_u * n_v`.
        expected: usize,
        /// Entries actually supplied.
        actual: usize,
    },

    /// Every unique knot needs exactly one multiplicity.
    #[error("knot and multiplicity counts differ in {direction}")]
    MultiplicityCount {
        /// The offending direction.
        direction: Direction,
    },

    /// Multiplicities must sum to pole count + degree + 1.
    #[error("knot law broken in {direction}: multiplicities sum to {actual}, expected {expected}")]
    KnotLaw {
        /// The offending direction.
        direction: Direction,
        /// Pole count + degree + 1.
        expected: usize,
        /// Actual multiplicity sum.
        actual: usize,
    },

    /// Unique knot values must be strictly increasing.
    #[error("unique knots in {direction} are not strictly increasing")]
    UnsortedKnots {
        /// The offending direction.
        direction: Direction,
    },

    /// Weights must be strictly positive.
    #[error("pole {index} has non-positive weight")]
    NonPositiveWeight {
        /// Flat row-major pole index.
        index: usize,
    },

    /// Degrees must be positive.
    #[error("degree in {direction} must be positive")]
    ZeroDegree {
        /// The offending direction.
        direction: Direction,
    },

    /// The degree must be smaller than the pole count in its direction.
    #[error("degree {degree} in {direction} requires more than {poles} poles")]
    DegreeTooLarge {
        /// The offending direction.
        direction: Direction,
        /// The declared degree.
        degree: usize,
        /// The available pole count.
        poles: usize,
    },

    /// The surface could not be wrapped into a face.
    #[error("face construction failed: {message}")]
    FaceConstruction {
        /// What the face builder rejected.
        message: String,
    },
}

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, BrepError>;
