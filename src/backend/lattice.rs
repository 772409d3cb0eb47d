//! Lattice backend: independent slot prisms, no booleans.

use crate::config::StencilConfig;
use crate::float_types::Real;
use crate::slots::{OrientedRect, SlotShape};
use crate::triangulated::{MeshVertex, Triangulated3D};
use nalgebra::{Point3, Vector3};

/// A plain bag of triangles. Prisms share no vertices and the mesh makes
/// no manifoldness promises; it exists to preview the cut pattern when the
/// boolean kernel is unavailable.
#[derive(Debug, Clone, Default)]
pub struct PrismMesh {
    triangles: Vec<[MeshVertex; 3]>,
}

impl PrismMesh {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Appends the twelve triangles of one upright rectangular prism.
    ///
    /// All faces wind counterclockwise seen from outside the prism.
    fn push_prism(&mut self, rect: &OrientedRect, z_bottom: Real, z_top: Real) {
        let corners = rect.corners();
        let at = |i: usize, z: Real, normal: Vector3<Real>| {
            MeshVertex::new(Point3::new(corners[i].x, corners[i].y, z), normal)
        };

        let down = -Vector3::z();
        self.triangles.push([
            at(0, z_bottom, down),
            at(2, z_bottom, down),
            at(1, z_bottom, down),
        ]);
        self.triangles.push([
            at(0, z_bottom, down),
            at(3, z_bottom, down),
            at(2, z_bottom, down),
        ]);

        let up = Vector3::z();
        self.triangles
            .push([at(0, z_top, up), at(1, z_top, up), at(2, z_top, up)]);
        self.triangles
            .push([at(0, z_top, up), at(2, z_top, up), at(3, z_top, up)]);

        for i in 0..4 {
            let j = (i + 1) % 4;
            let edge = corners[j] - corners[i];
            let length = edge.norm();
            if length <= Real::EPSILON {
                continue;
            }
            // Corners run counterclockwise, so this faces away from the
            // prism interior.
            let out = Vector3::new(edge.y / length, -edge.x / length, 0.0);
            self.triangles
                .push([at(i, z_bottom, out), at(j, z_bottom, out), at(j, z_top, out)]);
            self.triangles
                .push([at(i, z_bottom, out), at(j, z_top, out), at(i, z_top, out)]);
        }
    }
}

impl Triangulated3D for PrismMesh {
    fn visit_triangles<F>(&self, mut visitor: F)
    where
        F: FnMut([MeshVertex; 3]),
    {
        for triangle in &self.triangles {
            visitor(*triangle);
        }
    }
}

/// One prism per slot rectangle, spanning the full plate thickness.
pub fn build_lattice(config: &StencilConfig, shapes: &[SlotShape]) -> PrismMesh {
    let mut mesh = PrismMesh::default();
    for shape in shapes {
        for rect in &shape.rects {
            mesh.push_prism(rect, 0.0, config.thickness);
        }
    }
    mesh
}
