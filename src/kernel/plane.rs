//! Planes and polygon splitting for the BSP kernel.

use crate::float_types::{EPSILON, Real};
use crate::kernel::polygon::Polygon;
use crate::triangulated::MeshVertex;
use nalgebra::{Point3, Vector3};

// Classification of a point or polygon against a plane. SPANNING is the
// bitwise OR of FRONT and BACK.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// An oriented plane `normal . p == w` in 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<Real>,
    pub w: Real,
}

impl Plane {
    pub const fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        Plane { normal, w }
    }

    /// Best-fit plane of a polygon boundary via Newell's method.
    ///
    /// Robust against collinear runs that would break a naive three-point
    /// cross product. Degenerate input falls back to +Z.
    pub fn from_vertices(vertices: &[MeshVertex]) -> Self {
        let mut normal = Vector3::zeros();
        let n = vertices.len();
        for i in 0..n {
            let p = vertices[i].position;
            let q = vertices[(i + 1) % n].position;
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        let length = normal.norm();
        if length < EPSILON {
            normal = Vector3::z();
        } else {
            normal /= length;
        }
        let w = match vertices.first() {
            Some(v) => normal.dot(&v.position.coords),
            None => 0.0,
        };
        Plane { normal, w }
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed side of `point`: [`FRONT`], [`BACK`] or [`COPLANAR`] within
    /// [`EPSILON`].
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let distance = self.normal.dot(&point.coords) - self.w;
        if distance > EPSILON {
            FRONT
        } else if distance < -EPSILON {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Which side a coplanar polygon belongs on: [`FRONT`] when its plane
    /// faces the same way as this one.
    pub fn orient_plane(&self, other: &Plane) -> i8 {
        if self.normal.dot(&other.normal) > 0.0 {
            FRONT
        } else {
            BACK
        }
    }

    /// OR of the per-vertex orientations of `polygon`.
    pub fn classify_polygon(&self, polygon: &Polygon) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.position))
    }

    /// Splits `polygon` by this plane into coplanar-front, coplanar-back,
    /// front and back sets.
    ///
    /// Fragments keep the original polygon's plane rather than recomputing
    /// it from the clipped boundary, so repeated splitting cannot drift the
    /// orientation of thin slivers.
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
    ) -> (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.position))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.orient_plane(&polygon.plane) == FRONT {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let mut front_verts = Vec::with_capacity(polygon.vertices.len() + 2);
                let mut back_verts = Vec::with_capacity(polygon.vertices.len() + 2);
                for i in 0..polygon.vertices.len() {
                    let j = (i + 1) % polygon.vertices.len();
                    let ti = types[i];
                    let tj = types[j];
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];
                    if ti != BACK {
                        front_verts.push(*vi);
                    }
                    if ti != FRONT {
                        back_verts.push(*vi);
                    }
                    if (ti | tj) == SPANNING {
                        let edge = vj.position - vi.position;
                        let denom = self.normal.dot(&edge);
                        if denom.abs() > EPSILON {
                            let t = (self.w - self.normal.dot(&vi.position.coords)) / denom;
                            let v = vi.interpolate(vj, t);
                            front_verts.push(v);
                            back_verts.push(v);
                        }
                    }
                }
                if front_verts.len() >= 3 {
                    front.push(Polygon::with_plane(front_verts, polygon.plane.clone()));
                }
                if back_verts.len() >= 3 {
                    back.push(Polygon::with_plane(back_verts, polygon.plane.clone()));
                }
            },
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
