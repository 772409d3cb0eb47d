//! STL serialization round-trips.

use std::io::Cursor;

use hexstencil::io::{StlFormat, write_stl_file};
use hexstencil::{BackendRequest, Stencil, StencilConfig};

mod support;
use support::{collect_triangles, parse_ascii_stl};

fn small_stencil() -> Stencil {
    let config = StencilConfig {
        width: 42.0,
        height: 38.0,
        border: 5.0,
        ..StencilConfig::default()
    };
    // The lattice backend keeps these tests about serialization, not booleans.
    Stencil::build(config, BackendRequest::Lattice).unwrap()
}

#[test]
fn ascii_document_structure_and_counts() {
    let stencil = small_stencil();
    let text = stencil.to_stl_ascii("hex_stencil");

    assert!(text.starts_with("solid hex_stencil\n"));
    assert!(text.ends_with("endsolid hex_stencil\n"));

    let facets = parse_ascii_stl(&text);
    assert_eq!(facets.len(), stencil.triangle_count());
}

#[test]
fn ascii_normals_are_unit_and_match_winding() {
    let stencil = small_stencil();
    let facets = parse_ascii_stl(&stencil.to_stl_ascii("hex_stencil"));

    for facet in &facets {
        let [a, b, c] = facet.vertices;
        let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let mut cross = [
            u[1] * v[2] - u[2] * v[1],
            u[2] * v[0] - u[0] * v[2],
            u[0] * v[1] - u[1] * v[0],
        ];
        let length =
            (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt();
        assert!(length > 0.0, "degenerate facet in output");
        for component in &mut cross {
            *component /= length;
        }

        let n = facet.normal;
        let norm = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!(support::approx_eq(norm, 1.0, 1e-4), "normal not unit: {n:?}");
        for i in 0..3 {
            assert!(
                support::approx_eq(n[i], cross[i], 1e-4),
                "stored normal {n:?} disagrees with winding normal {cross:?}"
            );
        }
    }
}

#[test]
fn binary_round_trips_through_stl_io() {
    let stencil = small_stencil();
    let bytes = stencil.to_stl_binary().unwrap();
    assert_eq!(bytes.len(), 80 + 4 + 50 * stencil.triangle_count());

    let mesh = stl_io::read_stl(&mut Cursor::new(&bytes)).unwrap();
    assert_eq!(mesh.faces.len(), stencil.triangle_count());
    assert!(!mesh.vertices.is_empty());
}

#[test]
fn binary_and_ascii_describe_the_same_triangles() {
    let stencil = small_stencil();

    let ascii_facets = parse_ascii_stl(&stencil.to_stl_ascii("hex_stencil"));
    let bytes = stencil.to_stl_binary().unwrap();
    let binary = stl_io::read_stl(&mut Cursor::new(&bytes)).unwrap();

    assert_eq!(ascii_facets.len(), binary.faces.len());
    // Spot-check the first facet's vertices agree to f32 precision.
    let first_binary: Vec<[f32; 3]> = binary.faces[0]
        .vertices
        .iter()
        .map(|&index| {
            let v = binary.vertices[index];
            [v[0], v[1], v[2]]
        })
        .collect();
    for (ascii_vertex, binary_vertex) in
        ascii_facets[0].vertices.iter().zip(first_binary.iter())
    {
        for i in 0..3 {
            assert!(support::approx_eq(
                ascii_vertex[i],
                binary_vertex[i] as hexstencil::float_types::Real,
                1e-4
            ));
        }
    }
}

#[test]
fn write_stl_file_replaces_existing_output() {
    let stencil = small_stencil();
    let path = std::env::temp_dir().join("hexstencil_overwrite_test.stl");

    write_stl_file(stencil.mesh(), &path, StlFormat::Binary, "first").unwrap();
    let binary_len = std::fs::metadata(&path).unwrap().len();
    assert_eq!(binary_len, (80 + 4 + 50 * stencil.triangle_count()) as u64);

    write_stl_file(stencil.mesh(), &path, StlFormat::Ascii, "second").unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("solid second\n"));
    assert_eq!(parse_ascii_stl(&text).len(), stencil.triangle_count());

    std::fs::remove_file(&path).unwrap();
}

#[cfg(feature = "csg")]
#[test]
fn solid_backend_ascii_export_stays_watertight() {
    use support::{positions, unmatched_edge_count};

    let config = StencilConfig {
        width: 42.0,
        height: 38.0,
        border: 5.0,
        ..StencilConfig::default()
    };
    let stencil = Stencil::build(config, BackendRequest::Solid).unwrap();
    let facets = parse_ascii_stl(&stencil.to_stl_ascii("hex_stencil"));
    let tri_positions: Vec<_> = facets.iter().map(|f| f.vertices).collect();
    assert_eq!(unmatched_edge_count(&tri_positions), 0);

    // Written at six decimals, the mesh triangles survive unchanged.
    let direct = positions(&collect_triangles(stencil.mesh()));
    assert_eq!(direct.len(), tri_positions.len());
}
