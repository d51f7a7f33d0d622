#![warn(missing_docs)]

//! Math types for the surfio geometry kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! CAD surface and mesh data: points, vectors, and the coincidence
//! tolerance used when wrapping surfaces into faces.

use nalgebra::Vector3;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A point in 2D parameter space.
pub type Point2 = nalgebra::Point2<f64>;

/// Geometric tolerance for coincidence decisions in the kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Confusion distance in mm: two points closer than this coincide.
    pub confusion: f64,
}

impl Tolerance {
    /// Kernel default confusion tolerance (1e-7 mm).
    pub const DEFAULT: Self = Self { confusion: 1e-7 };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        (a - b).norm() < self.confusion
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.confusion
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerance_points_equal() {
        let tol = Tolerance::DEFAULT;
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(1.0 + 1e-8, 2.0, 3.0);
        assert!(tol.points_equal(&a, &b));
        let c = Point3::new(1.001, 2.0, 3.0);
        assert!(!tol.points_equal(&a, &c));
    }

    #[test]
    fn test_tolerance_is_zero() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.is_zero(1e-8));
        assert!(tol.is_zero(-1e-8));
        assert!(!tol.is_zero(1e-6));
    }
}
