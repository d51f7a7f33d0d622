//! STL reader with size-based binary detection.

use std::fs;
use std::path::Path;

use surfio_math::{Point3, Vec3};

use crate::error::{MeshError, Result};
use crate::obj::three_reals;
use crate::Mesh;

const HEADER_LEN: usize = 80;
const COUNT_LEN: usize = 4;
const TRIANGLE_LEN: usize = 50;

/// Read an STL file into a mesh.
///
/// The file is binary exactly when its size equals
/// `84 + triangle_count * 50`, with the count taken from the 4-byte
/// little-endian field after the 80-byte header; everything else,
/// including files shorter than the header, is parsed as ASCII.
pub fn import(path: &Path) -> Result<Mesh> {
    let bytes = fs::read(path).map_err(|source| MeshError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let mut mesh = Mesh::default();
    if is_binary(&bytes) {
        read_binary(&bytes, &mut mesh);
    } else {
        read_ascii(&bytes, &mut mesh);
    }
    Ok(mesh)
}

fn is_binary(bytes: &[u8]) -> bool {
    if bytes.len() < HEADER_LEN + COUNT_LEN {
        return false;
    }
    let count = triangle_count(bytes) as u64;
    bytes.len() as u64 == (HEADER_LEN + COUNT_LEN) as u64 + count * TRIANGLE_LEN as u64
}

fn triangle_count(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]])
}

/// Binary records: 12 bytes of facet normal, three 12-byte vertices,
/// and a 2-byte attribute count that is ignored. Every vertex is
/// appended fresh, so triangles share no indices.
fn read_binary(bytes: &[u8], mesh: &mut Mesh) {
    let count = triangle_count(bytes) as usize;
    for triangle in 0..count {
        let base = HEADER_LEN + COUNT_LEN + triangle * TRIANGLE_LEN;
        mesh.normals.push(Vec3::new(
            read_f32(bytes, base) as f64,
            read_f32(bytes, base + 4) as f64,
            read_f32(bytes, base + 8) as f64,
        ));
        let normal_index = mesh.normals.len() - 1;
        let mut face = Vec::with_capacity(3);
        for corner in 0..3 {
            let offset = base + 12 + corner * 12;
            mesh.vertices.push(Point3::new(
                read_f32(bytes, offset) as f64,
                read_f32(bytes, offset + 4) as f64,
                read_f32(bytes, offset + 8) as f64,
            ));
            face.push(mesh.vertices.len() - 1);
            mesh.normal_indices.push(normal_index);
        }
        mesh.faces.push(face);
    }
}

fn read_f32(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// ASCII records are matched by case-insensitive keyword prefix, with
/// `end facet` accepted as a split form of `endfacet`. A face is
/// emitted only when a facet accumulated at least three vertices; its
/// normal, when present, is appended once with one index per vertex.
fn read_ascii(bytes: &[u8], mesh: &mut Mesh) {
    let text = String::from_utf8_lossy(bytes);
    let mut face: Vec<usize> = Vec::new();
    let mut normal: Option<Vec3> = None;
    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else { continue };
        if has_prefix(keyword, "facet")
            && tokens.next().map_or(false, |t| has_prefix(t, "normal"))
        {
            face.clear();
            normal = three_reals(&mut tokens).map(|(x, y, z)| Vec3::new(x, y, z));
        } else if has_prefix(keyword, "vertex") {
            if let Some((x, y, z)) = three_reals(&mut tokens) {
                mesh.vertices.push(Point3::new(x, y, z));
                face.push(mesh.vertices.len() - 1);
            }
        } else if is_facet_end(keyword, &mut tokens) {
            if face.len() >= 3 {
                if let Some(n) = normal.take() {
                    mesh.normals.push(n);
                    let normal_index = mesh.normals.len() - 1;
                    mesh.normal_indices
                        .extend(std::iter::repeat(normal_index).take(face.len()));
                }
                mesh.faces.push(std::mem::take(&mut face));
            } else {
                face.clear();
                normal = None;
            }
        }
    }
}

fn is_facet_end(keyword: &str, tokens: &mut std::str::SplitWhitespace<'_>) -> bool {
    has_prefix(keyword, "endfacet")
        || (has_prefix(keyword, "end")
            && tokens.next().map_or(false, |t| has_prefix(t, "facet")))
}

fn has_prefix(token: &str, prefix: &str) -> bool {
    token
        .get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 12-triangle unit cube in the binary layout.
    fn cube_stl_bytes() -> Vec<u8> {
        let corner = |mask: u32| -> [f32; 3] {
            [
                if mask & 1 == 0 { -1.0 } else { 1.0 },
                if mask & 2 == 0 { -1.0 } else { 1.0 },
                if mask & 4 == 0 { -1.0 } else { 1.0 },
            ]
        };
        let triangles: [[u32; 3]; 12] = [
            [0, 1, 3],
            [0, 3, 2],
            [4, 6, 7],
            [4, 7, 5],
            [0, 4, 5],
            [0, 5, 1],
            [2, 3, 7],
            [2, 7, 6],
            [0, 2, 6],
            [0, 6, 4],
            [1, 5, 7],
            [1, 7, 3],
        ];
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes.extend_from_slice(&12u32.to_le_bytes());
        for triangle in triangles {
            for coord in [0.0f32, 0.0, 1.0] {
                bytes.extend_from_slice(&coord.to_le_bytes());
            }
            for index in triangle {
                for coord in corner(index) {
                    bytes.extend_from_slice(&coord.to_le_bytes());
                }
            }
            bytes.extend_from_slice(&0u16.to_le_bytes());
        }
        bytes
    }

    fn import_bytes(bytes: &[u8]) -> Mesh {
        let file = tempfile::NamedTempFile::with_suffix(".stl").unwrap();
        fs::write(file.path(), bytes).unwrap();
        import(file.path()).unwrap()
    }

    #[test]
    fn test_binary_cube_counts() {
        let mesh = import_bytes(&cube_stl_bytes());
        assert_eq!(mesh.vertices.len(), 36);
        assert_eq!(mesh.faces.len(), 12);
        assert_eq!(mesh.normals.len(), 12);
        assert_eq!(mesh.normal_indices.len(), 36);
        assert!(mesh.uvs.is_empty());
        assert_eq!(mesh.faces[0], vec![0, 1, 2]);
        assert_relative_eq!(mesh.vertices[0].x, -1.0);
        assert_relative_eq!(mesh.normals[0].z, 1.0);
    }

    #[test]
    fn test_size_law_decides_form() {
        // One trailing byte breaks the 84 + n * 50 law, so the plausible
        // count at byte 80 no longer matters and the ASCII path runs.
        let mut bytes = cube_stl_bytes();
        bytes.push(0);
        let mesh = import_bytes(&bytes);
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_short_file_is_ascii() {
        let mesh = import_bytes(b"solid tiny\nendsolid tiny\n");
        assert!(mesh.vertices.is_empty());
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_ascii_facets_mixed_case() {
        let mesh = import_bytes(
            b"solid demo\n\
              FACET NORMAL 0 0 1\n\
                outer loop\n\
                  VERTEX 0 0 0\n\
                  Vertex 1 0 0\n\
                  vertex 0 1 0\n\
                endloop\n\
              ENDFACET\n\
              facet normal 0 0 1\n\
                outer loop\n\
                  vertex 1 1 0\n\
                  vertex 0 1 0\n\
                  vertex 1 0 0\n\
                endloop\n\
              end facet\n\
            endsolid demo\n",
        );
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.faces.len(), 2);
        assert_eq!(mesh.normals.len(), 2);
        assert_eq!(mesh.normal_indices, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(mesh.faces[1], vec![3, 4, 5]);
    }

    #[test]
    fn test_ascii_incomplete_facet_dropped() {
        let mesh = import_bytes(
            b"solid demo\n\
              facet normal 0 0 1\n\
                vertex 0 0 0\n\
                vertex 1 0 0\n\
              endfacet\n\
            endsolid demo\n",
        );
        assert_eq!(mesh.vertices.len(), 2);
        assert!(mesh.faces.is_empty());
        assert!(mesh.normals.is_empty());
        assert!(mesh.normal_indices.is_empty());
    }

    #[test]
    fn test_ascii_facet_without_normal() {
        let mesh = import_bytes(
            b"solid demo\n\
              vertex 0 0 0\n\
              vertex 1 0 0\n\
              vertex 0 1 0\n\
              endfacet\n\
            endsolid demo\n",
        );
        assert_eq!(mesh.faces.len(), 1);
        assert!(mesh.normals.is_empty());
        assert!(mesh.normal_indices.is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = import(Path::new("/nonexistent/mesh.stl")).unwrap_err();
        assert!(matches!(err, MeshError::FileOpen { .. }));
    }
}
