//! Untrimmed faces and face compounds.

use crate::error::{BrepError, Result};
use crate::surface::BsplineSurface;
use surfio_math::Tolerance;

/// A surface wrapped as an untrimmed face.
///
/// Wrapping applies the kernel confusion tolerance: a surface whose
/// parameter domain collapses, or whose poles all coincide, cannot form
/// a face and is rejected with [`BrepError::FaceConstruction`].
#[derive(Debug, Clone)]
pub struct Face {
    surface: BsplineSurface,
    tolerance: f64,
}

impl Face {
    /// Wrap a surface into a face using the given coincidence tolerance.
    pub fn new(surface: BsplineSurface, tolerance: Tolerance) -> Result<Self> {
        let (u0, u1, v0, v1) = surface.domain();
        if u1 - u0 <= tolerance.confusion {
            return Err(BrepError::FaceConstruction {
                message: format!("parameter domain collapses in u: [{u0}, {u1}]"),
            });
        }
        if v1 - v0 <= tolerance.confusion {
            return Err(BrepError::FaceConstruction {
                message: format!("parameter domain collapses in v: [{v0}, {v1}]"),
            });
        }
        if poles_coincide(&surface, &tolerance) {
            return Err(BrepError::FaceConstruction {
                message: "all poles coincide".to_string(),
            });
        }
        Ok(Self {
            surface,
            tolerance: tolerance.confusion,
        })
    }

    /// The wrapped surface.
    pub fn surface(&self) -> &BsplineSurface {
        &self.surface
    }

    /// Confusion tolerance the face was built with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

fn poles_coincide(surface: &BsplineSurface, tolerance: &Tolerance) -> bool {
    let first = surface.pole(0, 0);
    for u in 0..surface.n_u() {
        for v in 0..surface.n_v() {
            if !tolerance.points_equal(&first, &surface.pole(u, v)) {
                return false;
            }
        }
    }
    true
}

/// An ordered collection of faces.
///
/// The compound implies no connectivity: faces are kept in the order
/// they were added and may or may not touch in space.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    faces: Vec<Face>,
}

impl Compound {
    /// Create an empty compound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a face, preserving insertion order.
    pub fn add(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// The faces in insertion order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of faces held.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True when the compound holds no faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
