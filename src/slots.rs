//! Dash and Y-junction slot geometry.
//!
//! Every lattice edge gets one dash centered on its midpoint; every lattice
//! vertex gets one Y junction with an arm per incident edge. Arms start one
//! `edge_gap_from_vertex` away from the vertex and the dash stops the same
//! clearance short of each arm tip, so in a sane configuration no two cuts
//! touch and the plate stays connected through the uncut bridges.

use crate::config::StencilConfig;
use crate::float_types::Real;
use crate::lattice::HexLattice;
use nalgebra::{Point2, Rotation2, Vector2};
use std::fmt;
use tracing::debug;

/// Dashes never shrink below this length, however tight the configuration.
pub const MIN_DASH_LENGTH: Real = 0.2;

/// An axis-angle rectangle in the plate plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub center: Point2<Real>,
    /// Rotation of the length axis, radians counterclockwise from +X.
    pub angle: Real,
    pub length: Real,
    pub width: Real,
}

impl OrientedRect {
    /// Corner positions in counterclockwise order.
    pub fn corners(&self) -> [Point2<Real>; 4] {
        let rotation = Rotation2::new(self.angle);
        let half_l = self.length / 2.0;
        let half_w = self.width / 2.0;
        [
            Vector2::new(-half_l, -half_w),
            Vector2::new(half_l, -half_w),
            Vector2::new(half_l, half_w),
            Vector2::new(-half_l, half_w),
        ]
        .map(|local| self.center + rotation * local)
    }

    /// Separating-axis overlap test against `other`.
    ///
    /// Returns true when the rectangles come closer than `clearance` on
    /// every candidate axis, i.e. they intersect or nearly touch.
    pub fn overlaps(&self, other: &OrientedRect, clearance: Real) -> bool {
        let corners_a = self.corners();
        let corners_b = other.corners();
        for rect in [self, other] {
            let rotation = Rotation2::new(rect.angle);
            for axis in [rotation * Vector2::x(), rotation * Vector2::y()] {
                let (min_a, max_a) = project(&corners_a, &axis);
                let (min_b, max_b) = project(&corners_b, &axis);
                if max_a < min_b - clearance || max_b < min_a - clearance {
                    return false;
                }
            }
        }
        true
    }
}

fn project(corners: &[Point2<Real>; 4], axis: &Vector2<Real>) -> (Real, Real) {
    let mut min = Real::MAX;
    let mut max = Real::MIN;
    for corner in corners {
        let d = corner.coords.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

/// The lattice feature a slot was derived from, kept for error reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotOrigin {
    /// A dash, generated from the edge between these endpoints.
    Edge { a: Point2<Real>, b: Point2<Real> },
    /// A Y junction, generated from the vertex at this position.
    Vertex { at: Point2<Real> },
}

impl fmt::Display for SlotOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotOrigin::Edge { a, b } => write!(
                f,
                "dash on edge ({:.2}, {:.2})-({:.2}, {:.2})",
                a.x, a.y, b.x, b.y
            ),
            SlotOrigin::Vertex { at } => {
                write!(f, "Y junction at ({:.2}, {:.2})", at.x, at.y)
            },
        }
    }
}

/// One slot cut: a single rectangle for a dash, up to three for a Y.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotShape {
    pub origin: SlotOrigin,
    pub rects: Vec<OrientedRect>,
}

/// Dash length for an edge of `edge_length`: symmetric about the midpoint,
/// clear of both Y arms by one gap, never below [`MIN_DASH_LENGTH`].
pub fn dash_length(edge_length: Real, config: &StencilConfig) -> Real {
    let reserved = 2.0 * (2.0 * config.edge_gap_from_vertex + config.vertex_arm_length);
    (edge_length - reserved).max(MIN_DASH_LENGTH)
}

/// One dash slot per lattice edge.
pub fn dash_slots(lattice: &HexLattice, config: &StencilConfig) -> Vec<SlotShape> {
    lattice
        .edges()
        .iter()
        .map(|edge| {
            let [a, b] = lattice.edge_endpoints(edge);
            let direction = b - a;
            let rect = OrientedRect {
                center: Point2::from((a.coords + b.coords) / 2.0),
                angle: direction.y.atan2(direction.x),
                length: dash_length(direction.norm(), config),
                width: config.slot_width,
            };
            SlotShape {
                origin: SlotOrigin::Edge { a, b },
                rects: vec![rect],
            }
        })
        .collect()
}

/// One Y slot per lattice vertex, one arm per incident edge.
///
/// Boundary vertices have fewer than three incident edges and emit exactly
/// that many arms; no synthetic arms are invented.
pub fn junction_slots(lattice: &HexLattice, config: &StencilConfig) -> Vec<SlotShape> {
    lattice
        .vertices()
        .iter()
        .enumerate()
        .map(|(v_idx, vertex)| {
            let arms = vertex
                .edges
                .iter()
                .map(|&e_idx| {
                    let edge = &lattice.edges()[e_idx];
                    let other = if edge.vertices[0] == v_idx {
                        edge.vertices[1]
                    } else {
                        edge.vertices[0]
                    };
                    let direction =
                        (lattice.vertices()[other].position - vertex.position).normalize();
                    let arm_center = vertex.position
                        + direction
                            * (config.edge_gap_from_vertex + config.vertex_arm_length / 2.0);
                    OrientedRect {
                        center: arm_center,
                        angle: direction.y.atan2(direction.x),
                        length: config.vertex_arm_length,
                        width: config.slot_width,
                    }
                })
                .collect();
            SlotShape {
                origin: SlotOrigin::Vertex {
                    at: vertex.position,
                },
                rects: arms,
            }
        })
        .collect()
}

/// All slot cuts for the lattice: dashes first, then junctions.
pub fn slot_shapes(lattice: &HexLattice, config: &StencilConfig) -> Vec<SlotShape> {
    let mut shapes = dash_slots(lattice, config);
    let dashes = shapes.len();
    shapes.extend(junction_slots(lattice, config));
    let rects: usize = shapes.iter().map(|shape| shape.rects.len()).sum();
    debug!(
        dashes,
        junctions = shapes.len() - dashes,
        rects,
        "generated slot cuts"
    );
    shapes
}

/// First pair of slot rectangles that overlap (or come within `clearance`
/// of touching), across and within shapes. `None` means the cuts are
/// pairwise disjoint and safe to subtract.
pub fn find_overlap(
    shapes: &[SlotShape],
    clearance: Real,
) -> Option<(&SlotOrigin, &SlotOrigin)> {
    let rects: Vec<(&SlotOrigin, &OrientedRect)> = shapes
        .iter()
        .flat_map(|shape| shape.rects.iter().map(move |rect| (&shape.origin, rect)))
        .collect();
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].1.overlaps(rects[j].1, clearance) {
                return Some((rects[i].0, rects[j].0));
            }
        }
    }
    None
}
