//! STL export, ASCII and binary.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::errors::Result;
use crate::float_types::{EPSILON, Real};
use crate::triangulated::{MeshVertex, Triangulated3D};
use nalgebra::Vector3;

/// On-disk STL flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

/// Facet normal for an STL triangle: unit cross product of the winding,
/// falling back to the first stored vertex normal, then to zero for fully
/// degenerate triangles.
fn facet_normal(triangle: &[MeshVertex; 3]) -> Vector3<Real> {
    let cross = (triangle[1].position - triangle[0].position)
        .cross(&(triangle[2].position - triangle[0].position));
    let length = cross.norm();
    if length > EPSILON {
        return cross / length;
    }
    let stored = triangle[0].normal;
    let stored_length = stored.norm();
    if stored_length > EPSILON {
        stored / stored_length
    } else {
        Vector3::zeros()
    }
}

/// Renders `shape` as an ASCII STL document named `name`.
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    shape.visit_triangles(|triangle| {
        let n = facet_normal(&triangle);
        out.push_str(&format!(
            "  facet normal {:.6} {:.6} {:.6}\n",
            n.x, n.y, n.z
        ));
        out.push_str("    outer loop\n");
        for vertex in &triangle {
            let p = vertex.position;
            out.push_str(&format!(
                "      vertex {:.6} {:.6} {:.6}\n",
                p.x, p.y, p.z
            ));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Renders `shape` as binary STL bytes.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();
    shape.visit_triangles(|triangle| {
        let n = facet_normal(&triangle);
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: triangle.map(|vertex| {
                let p = vertex.position;
                Vertex::new([p.x as f32, p.y as f32, p.z as f32])
            }),
        });
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Writes `shape` to `path` in the requested format, replacing any
/// existing file.
pub fn write_stl_file<T: Triangulated3D>(
    shape: &T,
    path: &Path,
    format: StlFormat,
    name: &str,
) -> Result<()> {
    match format {
        StlFormat::Ascii => fs::write(path, to_stl_ascii(shape, name))?,
        StlFormat::Binary => fs::write(path, to_stl_binary(shape)?)?,
    }
    Ok(())
}
