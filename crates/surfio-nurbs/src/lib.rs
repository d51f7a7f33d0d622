#![warn(missing_docs)]

//! Application-level NURBS surface model.
//!
//! [`NurbsSurface`] is the caller-facing description of a rational
//! tensor-product surface: degrees, clamped knot vectors, and a 2-D grid
//! of homogeneous control points indexed `[u][v]`. A surface is validated
//! once via [`NurbsSurface::validate`] immediately before it is handed to
//! the kernel and is read-only from then on.
//!
//! [`knots::knot_multiplicities`] collapses an expanded knot vector into
//! the unique-value/multiplicity form the kernel consumes.

pub mod error;
pub mod knots;

pub use error::{Result, SurfaceError};

use serde::{Deserialize, Serialize};
use std::fmt;
use surfio_math::Point3;

/// A parametric direction on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The first parametric direction.
    U,
    /// The second parametric direction.
    V,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::U => write!(f, "u"),
            Direction::V => write!(f, "v"),
        }
    }
}

/// A homogeneous control point: Cartesian coordinates premultiplied by
/// the weight, stored as `(w*x, w*y, w*z, w)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    /// X coordinate times weight.
    pub wx: f64,
    /// Y coordinate times weight.
    pub wy: f64,
    /// Z coordinate times weight.
    pub wz: f64,
    /// Weight. Must be strictly positive for a valid surface.
    pub w: f64,
}

impl WeightedPoint {
    /// Create from already-homogeneous coordinates.
    pub fn new(wx: f64, wy: f64, wz: f64, w: f64) -> Self {
        Self { wx, wy, wz, w }
    }

    /// Create from a Cartesian point and a weight, premultiplying.
    pub fn from_cartesian(point: Point3, weight: f64) -> Self {
        Self {
            wx: point.x * weight,
            wy: point.y * weight,
            wz: point.z * weight,
            w: weight,
        }
    }

    /// Cartesian position: homogeneous coordinates divided by the weight.
    pub fn cartesian(&self) -> Point3 {
        if self.w.abs() < 1e-30 {
            Point3::origin()
        } else {
            Point3::new(self.wx / self.w, self.wy / self.w, self.wz / self.w)
        }
    }

    /// The weight component.
    pub fn weight(&self) -> f64 {
        self.w
    }
}

/// A rational tensor-product surface as supplied by callers.
///
/// The control grid is indexed `[u][v]`: `control_points.len()` poles in
/// the u direction, and every row holds the pole count in v. The knot
/// vectors are expanded (repeated values encode multiplicity) and clamped
/// at both ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurbsSurface {
    /// Degree in u. Positive, less than the u pole count.
    pub degree_u: usize,
    /// Degree in v. Positive, less than the v pole count.
    pub degree_v: usize,
    /// Knot vector in u. Length = poles_u + degree_u + 1.
    pub knots_u: Vec<f64>,
    /// Knot vector in v. Length = poles_v + degree_v + 1.
    pub knots_v: Vec<f64>,
    /// Control grid indexed `[u][v]`, uniform row length.
    pub control_points: Vec<Vec<WeightedPoint>>,
}

impl NurbsSurface {
    /// Number of poles in the u direction (grid rows).
    pub fn poles_u(&self) -> usize {
        self.control_points.len()
    }

    /// Number of poles in the v direction (grid columns).
    pub fn poles_v(&self) -> usize {
        self.control_points.first().map_or(0, Vec::len)
    }

    /// Check the structural invariants required before conversion.
    ///
    /// Verifies that the grid is rectangular and non-empty, that each
    /// degree is positive and smaller than the pole count in its
    /// direction, that each knot vector is non-decreasing with length
    /// equal to pole count + degree + 1, and that every weight is
    /// strictly positive.
    pub fn validate(&self) -> Result<()> {
        let n_u = self.poles_u();
        let n_v = self.poles_v();
        if n_u == 0 || n_v == 0 {
            return Err(SurfaceError::EmptyGrid);
        }
        for (row, points) in self.control_points.iter().enumerate() {
            if points.len() != n_v {
                return Err(SurfaceError::RaggedGrid {
                    row,
                    len: points.len(),
                    expected: n_v,
                });
            }
        }

        validate_direction(Direction::U, &self.knots_u, n_u, self.degree_u)?;
        validate_direction(Direction::V, &self.knots_v, n_v, self.degree_v)?;

        for (u, row) in self.control_points.iter().enumerate() {
            for (v, point) in row.iter().enumerate() {
                if point.w <= 0.0 {
                    return Err(SurfaceError::NonPositiveWeight {
                        u,
                        v,
                        weight: point.w,
                    });
                }
            }
        }
        Ok(())
    }
}

fn validate_direction(
    direction: Direction,
    knots: &[f64],
    poles: usize,
    degree: usize,
) -> Result<()> {
    if degree == 0 {
        return Err(SurfaceError::ZeroDegree { direction });
    }
    if degree >= poles {
        return Err(SurfaceError::DegreeTooLarge {
            direction,
            degree,
            poles,
        });
    }
    let expected = poles + degree + 1;
    if knots.len() != expected {
        return Err(SurfaceError::KnotCount {
            direction,
            expected,
            actual: knots.len(),
        });
    }
    for i in 1..knots.len() {
        if knots[i] < knots[i - 1] {
            return Err(SurfaceError::DecreasingKnots {
                direction,
                index: i,
            });
        }
    }
    Ok(())
}
