//! End-to-end backend behavior, including the watertightness guarantee.

use hexstencil::float_types::Real;
use hexstencil::lattice::HexLattice;
use hexstencil::slots::slot_shapes;
use hexstencil::{BackendKind, BackendRequest, Stencil, StencilConfig};

mod support;
use support::{
    approx_eq, bounding_box, collect_triangles, positions, signed_volume, unmatched_edge_count,
};

/// The representative plotting stencil configuration.
fn representative() -> StencilConfig {
    StencilConfig {
        width: 170.0,
        height: 170.0,
        thickness: 1.6,
        hex_flat_to_flat: 25.4,
        slot_width: 1.0,
        edge_gap_from_vertex: 1.0,
        vertex_arm_length: 3.0,
        border: 5.0,
    }
}

/// Total slot cross-section area times thickness: the material removed by
/// full-depth cuts of pairwise disjoint rectangles.
fn expected_cut_volume(config: &StencilConfig) -> Real {
    let lattice = HexLattice::generate(config);
    slot_shapes(&lattice, config)
        .iter()
        .flat_map(|shape| shape.rects.iter())
        .map(|rect| rect.length * rect.width * config.thickness)
        .sum()
}

#[cfg(feature = "csg")]
#[test]
fn representative_solid_is_watertight() {
    let config = representative();
    let stencil = Stencil::build(config, BackendRequest::Solid).unwrap();
    assert_eq!(stencil.backend(), BackendKind::Solid);

    let triangles = collect_triangles(stencil.mesh());
    let tri_positions = positions(&triangles);
    assert_eq!(unmatched_edge_count(&tri_positions), 0);

    let bounds = bounding_box(&triangles);
    assert!(approx_eq(bounds[0], -85.0, 1e-6) && approx_eq(bounds[3], 85.0, 1e-6));
    assert!(approx_eq(bounds[1], -85.0, 1e-6) && approx_eq(bounds[4], 85.0, 1e-6));
    assert!(approx_eq(bounds[2], 0.0, 1e-6) && approx_eq(bounds[5], 1.6, 1e-6));

    let plate_volume = 170.0 * 170.0 * 1.6;
    let expected = plate_volume - expected_cut_volume(&config);
    let volume = signed_volume(&tri_positions);
    assert!(
        (volume - expected).abs() < 0.1,
        "volume {volume} differs from expected {expected}"
    );
}

#[cfg(feature = "csg")]
#[test]
fn degenerate_slot_layout_is_a_build_error() {
    use hexstencil::StencilError;

    // Arms long enough to collide in the middle of every edge.
    let config = StencilConfig {
        vertex_arm_length: 20.0,
        edge_gap_from_vertex: 0.1,
        ..representative()
    };
    let result = Stencil::build(config, BackendRequest::Solid);
    assert!(matches!(
        result,
        Err(StencilError::GeometryDegeneracy { .. })
    ));
}

#[test]
fn forced_fallback_reports_lattice_and_counts_prisms() {
    let config = representative();
    let stencil = Stencil::build(config, BackendRequest::Lattice).unwrap();
    assert_eq!(stencil.backend(), BackendKind::Lattice);
    assert_eq!(format!("{}", stencil.backend()), "lattice");

    let lattice = HexLattice::generate(&config);
    let rect_count: usize = slot_shapes(&lattice, &config)
        .iter()
        .map(|shape| shape.rects.len())
        .sum();
    assert_eq!(stencil.triangle_count(), 12 * rect_count);

    // Independent outward prisms: total signed volume is the sum of the
    // cut volumes even though the soup is not manifold.
    let tri_positions = positions(&collect_triangles(stencil.mesh()));
    let volume = signed_volume(&tri_positions);
    assert!(
        (volume - expected_cut_volume(&config)).abs() < 1e-6,
        "fallback volume {volume}"
    );
}

#[test]
fn auto_matches_compiled_capabilities() {
    let config = StencilConfig {
        width: 42.0,
        height: 38.0,
        border: 5.0,
        ..StencilConfig::default()
    };
    let stencil = Stencil::build(config, BackendRequest::Auto).unwrap();
    if cfg!(feature = "csg") {
        assert_eq!(stencil.backend(), BackendKind::Solid);
    } else {
        assert_eq!(stencil.backend(), BackendKind::Lattice);
    }
}

#[cfg(not(feature = "csg"))]
#[test]
fn solid_request_without_kernel_errors() {
    use hexstencil::StencilError;

    let result = Stencil::build(representative(), BackendRequest::Solid);
    assert!(matches!(
        result,
        Err(StencilError::BackendUnavailable { requested: "solid" })
    ));
}
