//! Solid backend: extrude the plate, subtract the slot cuts, verify the
//! result is watertight.

use crate::config::StencilConfig;
use crate::errors::{Result, StencilError};
use crate::float_types::{Real, SNAP_EPSILON};
use crate::kernel::Solid;
use crate::slots::{self, OrientedRect, SlotShape};
use crate::triangulated::Triangulated3D;
use geo::{Coord, LineString, Polygon as GeoPolygon};
use hashbrown::HashMap;
use nalgebra::Point3;
use tracing::debug;

/// Cut prisms overshoot the plate faces by this much on each side, so the
/// subtraction never has to resolve caps coplanar with the plate surface.
pub const CUT_OVERSHOOT: Real = 0.4;

/// Builds the watertight stencil solid.
///
/// The slot prisms are pairwise disjoint for any configuration that passes
/// the overlap pre-check, so their point-set union is exactly the
/// concatenation of their boundaries and a single subtraction removes them
/// all. Sequencing per-slot booleans instead would refragment the plate on
/// every step.
pub fn build_solid(config: &StencilConfig, shapes: &[SlotShape]) -> Result<Solid> {
    if let Some((first, second)) = slots::find_overlap(shapes, SNAP_EPSILON) {
        return Err(StencilError::GeometryDegeneracy {
            first: first.to_string(),
            second: second.to_string(),
        });
    }

    let plate = Solid::extrude_polygon(
        &centered_rect(config.width, config.height),
        0.0,
        config.thickness,
    );

    let mut cutter_polygons = Vec::new();
    for shape in shapes {
        for rect in &shape.rects {
            let prism = Solid::extrude_polygon(
                &rect_profile(rect),
                -CUT_OVERSHOOT,
                config.thickness + CUT_OVERSHOOT,
            );
            cutter_polygons.extend(prism.polygons);
        }
    }
    let cutter = Solid::from_polygons(cutter_polygons);
    debug!(
        plate_polygons = plate.polygons.len(),
        cutter_polygons = cutter.polygons.len(),
        "subtracting slot cuts from plate"
    );

    let stenciled = plate.difference(&cutter).split_t_junctions();

    if let Some(context) = open_edge_report(&stenciled) {
        return Err(StencilError::BooleanFailure { context });
    }
    Ok(stenciled)
}

/// Axis-aligned plate outline centered on the origin.
fn centered_rect(width: Real, height: Real) -> GeoPolygon<Real> {
    let half_w = width / 2.0;
    let half_h = height / 2.0;
    GeoPolygon::new(
        LineString::new(vec![
            Coord {
                x: -half_w,
                y: -half_h,
            },
            Coord {
                x: half_w,
                y: -half_h,
            },
            Coord {
                x: half_w,
                y: half_h,
            },
            Coord {
                x: -half_w,
                y: half_h,
            },
            Coord {
                x: -half_w,
                y: -half_h,
            },
        ]),
        vec![],
    )
}

/// Closed outline of one oriented slot rectangle.
fn rect_profile(rect: &OrientedRect) -> GeoPolygon<Real> {
    let corners = rect.corners();
    let mut ring: Vec<Coord<Real>> = corners
        .iter()
        .map(|corner| Coord {
            x: corner.x,
            y: corner.y,
        })
        .collect();
    ring.push(ring[0]);
    GeoPolygon::new(LineString::new(ring), vec![])
}

/// Checks that every quantized edge is shared by exactly two triangles,
/// once per direction. Returns a description of the defects, or `None`
/// for a watertight mesh.
fn open_edge_report(solid: &Solid) -> Option<String> {
    let scale = 1.0 / SNAP_EPSILON;
    let key = |p: &Point3<Real>| {
        (
            (p.x * scale).round() as i64,
            (p.y * scale).round() as i64,
            (p.z * scale).round() as i64,
        )
    };

    // Forward/reverse use counts per undirected edge.
    let mut edges: HashMap<((i64, i64, i64), (i64, i64, i64)), (u32, u32)> = HashMap::new();
    let mut degenerate = 0usize;
    solid.visit_triangles(|triangle| {
        for i in 0..3 {
            let a = key(&triangle[i].position);
            let b = key(&triangle[(i + 1) % 3].position);
            if a == b {
                degenerate += 1;
                continue;
            }
            let entry = if a < b {
                let entry = edges.entry((a, b)).or_insert((0, 0));
                &mut entry.0
            } else {
                let entry = edges.entry((b, a)).or_insert((0, 0));
                &mut entry.1
            };
            *entry += 1;
        }
    });

    let unmatched = edges
        .values()
        .filter(|(forward, reverse)| *forward != 1 || *reverse != 1)
        .count();
    if unmatched == 0 && degenerate == 0 {
        None
    } else {
        Some(format!(
            "{unmatched} of {} mesh edges are not shared by exactly two triangles \
             ({degenerate} degenerate edges)",
            edges.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::HexLattice;
    use crate::slots::slot_shapes;

    fn one_hex_config() -> StencilConfig {
        StencilConfig {
            width: 42.0,
            height: 38.0,
            border: 5.0,
            ..StencilConfig::default()
        }
    }

    #[test]
    fn single_hex_solid_is_watertight() {
        let config = one_hex_config();
        let lattice = HexLattice::generate(&config);
        let shapes = slot_shapes(&lattice, &config);
        let solid = build_solid(&config, &shapes).unwrap();
        assert!(open_edge_report(&solid).is_none());
        assert!(!solid.is_empty());
    }

    #[test]
    fn overlapping_slots_are_reported_as_degenerate() {
        // An arm length beyond half the edge makes opposing arms collide.
        let config = StencilConfig {
            vertex_arm_length: 20.0,
            edge_gap_from_vertex: 0.1,
            ..one_hex_config()
        };
        let lattice = HexLattice::generate(&config);
        let shapes = slot_shapes(&lattice, &config);
        let result = build_solid(&config, &shapes);
        assert!(matches!(
            result,
            Err(StencilError::GeometryDegeneracy { .. })
        ));
    }

    #[test]
    fn open_edge_report_flags_a_lone_triangle() {
        use crate::kernel::Polygon;
        use crate::triangulated::MeshVertex;
        use nalgebra::Vector3;

        let lone = Solid::from_polygons(vec![Polygon::new(vec![
            MeshVertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
            MeshVertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            MeshVertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
        ])]);
        assert!(open_edge_report(&lone).is_some());
    }
}
