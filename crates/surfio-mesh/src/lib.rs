#![warn(missing_docs)]

//! Triangle and polygon mesh import.
//!
//! Reads Wavefront OBJ and STL files into a flat [`Mesh`]. STL files
//! are detected as binary or ASCII from the file size alone. Parsing is
//! best-effort: malformed records are skipped and whatever parsed up to
//! that point is kept; only failing to open the file is an error.

mod error;
mod obj;
mod stl;

pub use error::{MeshError, Result};

use serde::{Deserialize, Serialize};
use std::path::Path;
use surfio_math::{Point2, Point3, Vec3};

/// An indexed mesh with optional texture and normal attributes.
///
/// `uv_indices` and `normal_indices` are flat streams appended in
/// encounter order, not grouped per face; consumers walk them in
/// lockstep with the face list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Texture coordinates.
    pub uvs: Vec<Point2>,
    /// Normal vectors.
    pub normals: Vec<Vec3>,
    /// Faces as lists of 0-based vertex indices.
    pub faces: Vec<Vec<usize>>,
    /// Flat stream of 0-based texture-coordinate indices.
    pub uv_indices: Vec<usize>,
    /// Flat stream of 0-based normal indices.
    pub normal_indices: Vec<usize>,
}

impl Mesh {
    /// Read a Wavefront OBJ file.
    pub fn from_obj_file(path: impl AsRef<Path>) -> Result<Self> {
        obj::import(path.as_ref())
    }

    /// Read an STL file, binary or ASCII.
    pub fn from_stl_file(path: impl AsRef<Path>) -> Result<Self> {
        stl::import(path.as_ref())
    }
}
