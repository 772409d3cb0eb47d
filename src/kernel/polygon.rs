//! Planar polygons with per-vertex normals.

use crate::float_types::Real;
use crate::kernel::plane::Plane;
use crate::triangulated::MeshVertex;
use nalgebra::{Point3, Vector3};

/// A convex planar polygon. Vertices run counterclockwise when viewed from
/// the front side of `plane`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<MeshVertex>,
    pub plane: Plane,
}

impl Polygon {
    /// Builds a polygon and derives its plane from the boundary.
    pub fn new(vertices: Vec<MeshVertex>) -> Self {
        debug_assert!(vertices.len() >= 3, "polygon needs at least three vertices");
        let plane = Plane::from_vertices(&vertices);
        Polygon { vertices, plane }
    }

    /// Builds a polygon that keeps a caller-supplied plane. Used by the
    /// splitter so fragments inherit the parent orientation.
    pub fn with_plane(vertices: Vec<MeshVertex>, plane: Plane) -> Self {
        debug_assert!(vertices.len() >= 3, "polygon needs at least three vertices");
        Polygon { vertices, plane }
    }

    /// Reverses winding and flips all normals.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for vertex in &mut self.vertices {
            vertex.flip();
        }
        self.plane.flip();
    }

    /// Arithmetic mean of the vertex positions. Interior for any convex
    /// polygon, which is all this kernel ever produces.
    pub fn centroid(&self) -> Point3<Real> {
        let mut sum = Vector3::zeros();
        for vertex in &self.vertices {
            sum += vertex.position.coords;
        }
        Point3::from(sum / self.vertices.len() as Real)
    }

    /// Streams the polygon as triangles: direct for a triangle, a centroid
    /// fan otherwise.
    ///
    /// The fan keeps boundary edges whole, so edge pairing with adjacent
    /// polygons survives triangulation even when the boundary carries
    /// collinear healing vertices.
    pub fn visit_triangles<F>(&self, visitor: &mut F)
    where
        F: FnMut([MeshVertex; 3]),
    {
        let n = self.vertices.len();
        if n < 3 {
            return;
        }
        if n == 3 {
            visitor([self.vertices[0], self.vertices[1], self.vertices[2]]);
            return;
        }
        let center = MeshVertex::new(self.centroid(), self.plane.normal);
        for i in 0..n {
            visitor([center, self.vertices[i], self.vertices[(i + 1) % n]]);
        }
    }
}
