#![warn(missing_docs)]

//! NURBS surface exchange: B-rep conversion, STEP and IGES export, and
//! OBJ/STL mesh import.
//!
//! Surfaces are described by [`NurbsSurface`] grids of homogeneous
//! control points, converted into a [`Compound`] of untrimmed faces,
//! and written as STEP AP214 (Part 21) or IGES 5.3. The reverse
//! direction reads triangle meshes from OBJ and STL files into a
//! [`Mesh`].
//!
//! # Example
//!
//! ```rust,no_run
//! use surfio::{NurbsSurface, Point3, WeightedPoint};
//!
//! let control_points = (0..3)
//!     .map(|u| {
//!         (0..3)
//!             .map(|v| WeightedPoint::from_cartesian(Point3::new(u as f64, v as f64, 0.0), 1.0))
//!             .collect()
//!     })
//!     .collect();
//! let sheet = NurbsSurface {
//!     degree_u: 2,
//!     degree_v: 2,
//!     knots_u: vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
//!     knots_v: vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
//!     control_points,
//! };
//! let report = surfio::export_step(&[sheet], "sheet.step").unwrap();
//! println!("wrote {} face(s)", report.faces_written);
//! ```

mod error;

pub use error::{ExportError, Result};
pub use surfio_brep::{surfaces_to_compound, BsplineSurface, Compound, Conversion, Face};
pub use surfio_iges::IgesSettings;
pub use surfio_math::{Point2, Point3, Tolerance, Vec3};
pub use surfio_mesh::{Mesh, MeshError};
pub use surfio_nurbs::{knots, Direction, NurbsSurface, SurfaceError, WeightedPoint};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Process-wide export configuration.
#[derive(Debug, Clone, Copy)]
pub struct Runtime {
    /// Confusion tolerance applied when wrapping surfaces into faces.
    pub tolerance: Tolerance,
    /// IGES global-section settings (millimeters, unit scale 1.0).
    pub iges: IgesSettings,
}

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Initialize (once) and return the process-wide runtime configuration.
///
/// The first caller performs the setup; every later call returns the
/// same instance. The exporters call this lazily, so concurrent first
/// exports are safe and repeated initialization has no further effect.
pub fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        let tolerance = Tolerance::DEFAULT;
        Runtime {
            tolerance,
            iges: IgesSettings {
                resolution: tolerance.confusion,
                ..IgesSettings::default()
            },
        }
    })
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Number of faces written to the output file.
    pub faces_written: usize,
    /// Input indices whose face construction failed and were skipped.
    pub skipped: Vec<usize>,
}

/// Export NURBS surfaces to a STEP AP214 file.
///
/// Every surface is validated before anything is written; an empty
/// input or an invalid surface aborts the export. Surfaces that cannot
/// be wrapped into faces are skipped and reported, and the export fails
/// with [`ExportError::Transfer`] when no face remains.
pub fn export_step(surfaces: &[NurbsSurface], path: impl AsRef<Path>) -> Result<ExportReport> {
    let runtime = runtime();
    if surfaces.is_empty() {
        return Err(ExportError::EmptyInput);
    }
    let conversion = surfaces_to_compound(surfaces, runtime.tolerance)?;
    surfio_step::write_step(&conversion.compound, path)?;
    Ok(ExportReport {
        faces_written: conversion.compound.len(),
        skipped: conversion.skipped,
    })
}

/// Export NURBS surfaces to an IGES 5.3 file.
///
/// Shares the validation, skipping, and transfer behavior of
/// [`export_step`]; units come from the runtime configuration.
pub fn export_iges(surfaces: &[NurbsSurface], path: impl AsRef<Path>) -> Result<ExportReport> {
    let runtime = runtime();
    if surfaces.is_empty() {
        return Err(ExportError::EmptyInput);
    }
    let conversion = surfaces_to_compound(surfaces, runtime.tolerance)?;
    surfio_iges::write_iges(&conversion.compound, &runtime.iges, path)?;
    Ok(ExportReport {
        faces_written: conversion.compound.len(),
        skipped: conversion.skipped,
    })
}

/// Import a Wavefront OBJ mesh.
pub fn import_obj(path: impl AsRef<Path>) -> std::result::Result<Mesh, MeshError> {
    Mesh::from_obj_file(path)
}

/// Import an STL mesh, binary or ASCII.
pub fn import_stl(path: impl AsRef<Path>) -> std::result::Result<Mesh, MeshError> {
    Mesh::from_stl_file(path)
}
