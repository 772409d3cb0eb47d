//! Triangle-stream abstraction shared by every mesh backend.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// A mesh vertex: position plus a (possibly zero) normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Point3<Real>,
    pub normal: Vector3<Real>,
}

impl MeshVertex {
    /// Builds a vertex, replacing non-finite coordinates with zeros so a
    /// single bad value cannot poison downstream plane math.
    pub fn new(position: Point3<Real>, normal: Vector3<Real>) -> Self {
        let position = if position.coords.iter().all(|c| c.is_finite()) {
            position
        } else {
            Point3::origin()
        };
        let normal = if normal.iter().all(|c| c.is_finite()) {
            normal
        } else {
            Vector3::zeros()
        };
        MeshVertex { position, normal }
    }

    /// Flips orientation by negating the normal.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linear interpolation toward `other` at parameter `t` in `[0, 1]`.
    pub fn interpolate(&self, other: &MeshVertex, t: Real) -> MeshVertex {
        MeshVertex {
            position: self.position + (other.position - self.position) * t,
            normal: self.normal + (other.normal - self.normal) * t,
        }
    }
}

/// Anything that can stream itself out as 3D triangles.
///
/// Both mesh backends end in the same STL serializer, so this is the only
/// surface the writer needs.
pub trait Triangulated3D {
    /// Call `visitor` for each triangle `[v0, v1, v2]`, counterclockwise
    /// when seen from outside the surface.
    fn visit_triangles<F>(&self, visitor: F)
    where
        F: FnMut([MeshVertex; 3]);

    /// Number of triangles the visitor would see.
    fn triangle_count(&self) -> usize {
        let mut count = 0;
        self.visit_triangles(|_| count += 1);
        count
    }
}
