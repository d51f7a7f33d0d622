//! Wavefront OBJ reader.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::SplitWhitespace;

use surfio_math::{Point2, Point3, Vec3};

use crate::error::{MeshError, Result};
use crate::Mesh;

/// Read an OBJ file into a mesh.
///
/// Blank lines, comments, unknown prefixes, and records that fail to
/// parse are skipped. Face tokens carry up to three 1-based indices
/// (`v`, `v/vt`, `v/vt/vn`); an index that is not positive or points
/// into an empty collection is dropped, and a face is emitted only when
/// at least one vertex index survives.
pub fn import(path: &Path) -> Result<Mesh> {
    let file = File::open(path).map_err(|source| MeshError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut mesh = Mesh::default();
    for line in reader.lines() {
        let Ok(line) = line else { break };
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(prefix) = tokens.next() else { continue };
        match prefix {
            "v" => {
                if let Some((x, y, z)) = three_reals(&mut tokens) {
                    mesh.vertices.push(Point3::new(x, y, z));
                }
            }
            "vt" => {
                if let Some((u, v)) = two_reals(&mut tokens) {
                    mesh.uvs.push(Point2::new(u, v));
                }
            }
            "vn" => {
                if let Some((x, y, z)) = three_reals(&mut tokens) {
                    mesh.normals.push(Vec3::new(x, y, z));
                }
            }
            "f" => read_face(&mut mesh, tokens),
            _ => {}
        }
    }
    Ok(mesh)
}

fn read_face(mesh: &mut Mesh, tokens: SplitWhitespace<'_>) {
    let mut face = Vec::new();
    for token in tokens {
        let mut parts = token.split('/');
        let vertex = parts.next().and_then(parse_index);
        let uv = parts.next().and_then(parse_index);
        let normal = parts.next().and_then(parse_index);
        if let Some(index) = vertex {
            face.push(index);
        }
        if let Some(index) = uv {
            if !mesh.uvs.is_empty() {
                mesh.uv_indices.push(index);
            }
        }
        if let Some(index) = normal {
            if !mesh.normals.is_empty() {
                mesh.normal_indices.push(index);
            }
        }
    }
    if !face.is_empty() {
        mesh.faces.push(face);
    }
}

/// Parse a 1-based index token to its 0-based value.
fn parse_index(token: &str) -> Option<usize> {
    let value: i64 = token.parse().ok()?;
    if value > 0 {
        Some((value - 1) as usize)
    } else {
        None
    }
}

pub(crate) fn three_reals(tokens: &mut SplitWhitespace<'_>) -> Option<(f64, f64, f64)> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some((x, y, z))
}

fn two_reals(tokens: &mut SplitWhitespace<'_>) -> Option<(f64, f64)> {
    let u = tokens.next()?.parse().ok()?;
    let v = tokens.next()?.parse().ok()?;
    Some((u, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    const CUBE_OBJ: &str = "\
# unit cube
v -1 -1 -1
v -1 -1 1
v -1 1 -1
v -1 1 1
v 1 -1 -1
v 1 -1 1
v 1 1 -1
v 1 1 1

f 1 2 4
f 1 4 3
f 5 7 8
f 5 8 6
f 1 5 6
f 1 6 2
f 3 4 8
f 3 8 7
f 1 3 7
f 1 7 5
f 2 6 8
f 2 8 4
";

    fn import_str(contents: &str) -> Mesh {
        let file = tempfile::NamedTempFile::with_suffix(".obj").unwrap();
        fs::write(file.path(), contents).unwrap();
        import(file.path()).unwrap()
    }

    #[test]
    fn test_cube_counts() {
        let mesh = import_str(CUBE_OBJ);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.faces.len(), 12);
        assert!(mesh.uvs.is_empty());
        assert!(mesh.normals.is_empty());
        assert!(mesh.uv_indices.is_empty());
        assert!(mesh.normal_indices.is_empty());
        assert_relative_eq!(mesh.vertices[0].x, -1.0);
        assert_eq!(mesh.faces[0], vec![0, 1, 3]);
    }

    #[test]
    fn test_texture_and_normal_indices_flat() {
        let mesh = import_str(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\nf 1/1/1 2/2/1 3/3/1\n",
        );
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
        assert_eq!(mesh.uv_indices, vec![0, 1, 2]);
        assert_eq!(mesh.normal_indices, vec![0, 0, 0]);
        assert_relative_eq!(mesh.uvs[1].x, 1.0);
        assert_relative_eq!(mesh.normals[0].z, 1.0);
    }

    #[test]
    fn test_bad_indices_dropped() {
        // No vt records, so the uv reference in the first token dangles.
        let mesh = import_str("v 0 0 0\nv 1 0 0\nvn 0 0 1\nf 1/2/1 2 0\n");
        assert_eq!(mesh.faces, vec![vec![0, 1]]);
        assert!(mesh.uv_indices.is_empty());
        assert_eq!(mesh.normal_indices, vec![0]);
    }

    #[test]
    fn test_face_without_usable_vertex_dropped() {
        let mesh = import_str("v 0 0 0\nf 0 -2 abc\n");
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_malformed_records_skipped() {
        let mesh = import_str("v 1.0 nope 2.0\nv 3 4 5\nvt 0.5\nq 1 2 3\n");
        assert_eq!(mesh.vertices.len(), 1);
        assert_relative_eq!(mesh.vertices[0].z, 5.0);
        assert!(mesh.uvs.is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = import(Path::new("/nonexistent/mesh.obj")).unwrap_err();
        assert!(matches!(err, MeshError::FileOpen { .. }));
    }
}
