//! Surface validation errors.

use crate::Direction;
use thiserror::Error;

/// Errors raised when a surface definition fails validation.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The control grid has no rows or no columns.
    #[error("control grid is empty")]
    EmptyGrid,

    /// A control grid row differs in length from the first row.
    #[error("control grid is ragged: row {row} has {len} points, expected {expected}")]
    RaggedGrid {
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },

    /// The degree in one direction is zero.
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

    /// The knot vector length must equal pole count + degree + 1.
    #[error("knot vector in {direction} has {actual} values, expected {expected}")]
    KnotCount {
        /// The offending direction.
        direction: Direction,
        /// Pole count + degree + 1.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Knot values must be non-decreasing.
    #[error("knot vector in {direction} decreases at index {index}")]
    DecreasingKnots {
        /// The offending direction.
        direction: Direction,
        /// Index of the first knot smaller than its predecessor.
        index: usize,
    },

    /// Control-point weights must be strictly positive.
    #[error("control point ({u},{v}) has non-positive weight {weight}")]
    NonPositiveWeight {
        /// Row (u) index of the offending point.
        u: usize,
        /// Column (v) index of the offending point.
        v: usize,
        /// The offending weight.
        weight: f64,
    },
}

/// Result type for surface validation.
pub type Result<T> = std::result::Result<T, SurfaceError>;
