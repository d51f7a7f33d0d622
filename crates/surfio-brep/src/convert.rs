//! Conversion from application-level NURBS surfaces to a face compound.

use crate::compound::{Compound, Face};
use crate::error::{BrepError, Result};
use crate::surface::BsplineSurface;
use surfio_math::Tolerance;
use surfio_nurbs::knots::knot_multiplicities;
use surfio_nurbs::NurbsSurface;

/// Outcome of a surface-list conversion.
///
/// `compound.len() + skipped.len()` always equals the input length.
#[derive(Debug)]
pub struct Conversion {
    /// One face per convertible surface, in input order.
    pub compound: Compound,
    /// Input indices whose face construction failed.
    pub skipped: Vec<usize>,
}

/// Convert a list of NURBS surfaces into one compound of untrimmed faces.
///
/// Every surface is validated up front; the first invalid surface aborts
/// the conversion with [`BrepError::InvalidSurface`]. Surfaces that pass
/// validation but cannot be wrapped into a face (collapsed domain,
/// coincident poles) are skipped and their indices recorded rather than
/// failing the whole conversion.
pub fn surfaces_to_compound(
    surfaces: &[NurbsSurface],
    tolerance: Tolerance,
) -> Result<Conversion> {
    if surfaces.is_empty() {
        return Err(BrepError::EmptyInput);
    }
    for (index, surface) in surfaces.iter().enumerate() {
        surface
            .validate()
            .map_err(|source| BrepError::InvalidSurface { index, source })?;
    }

    let mut compound = Compound::new();
    let mut skipped = Vec::new();
    for (index, surface) in surfaces.iter().enumerate() {
        match build_face(surface, tolerance) {
            Ok(face) => compound.add(face),
            Err(_) => skipped.push(index),
        }
    }
    Ok(Conversion { compound, skipped })
}

/// Dehomogenize one surface and wrap it as a face.
fn build_face(surface: &NurbsSurface, tolerance: Tolerance) -> Result<Face> {
    let n_u = surface.poles_u();
    let n_v = surface.poles_v();

    let mut poles = Vec::with_capacity(n_u * n_v);
    let mut weights = Vec::with_capacity(n_u * n_v);
    for row in &surface.control_points {
        for point in row {
            poles.push(point.cartesian());
            weights.push(point.weight());
        }
    }

    let (knots_u, mults_u): (Vec<f64>, Vec<usize>) =
        knot_multiplicities(&surface.knots_u).into_iter().unzip();
    let (knots_v, mults_v): (Vec<f64>, Vec<usize>) =
        knot_multiplicities(&surface.knots_v).into_iter().unzip();

    let bspline = BsplineSurface::new(
        poles,
        weights,
        n_u,
        n_v,
        knots_u,
        mults_u,
        knots_v,
        mults_v,
        surface.degree_u,
        surface.degree_v,
    )?;
    Face::new(bspline, tolerance)
}
