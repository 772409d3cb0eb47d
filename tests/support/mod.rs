//! Test support library
//! Provides shared helper functions & utilities for the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use hexstencil::float_types::{Real, SNAP_EPSILON};
use hexstencil::triangulated::{MeshVertex, Triangulated3D};

/// One facet parsed back out of an ASCII STL document.
#[derive(Debug, Clone, Copy)]
pub struct AsciiFacet {
    pub normal: [Real; 3],
    pub vertices: [[Real; 3]; 3],
}

/// Collects a mesh's triangles into a vector.
pub fn collect_triangles<T: Triangulated3D>(shape: &T) -> Vec<[MeshVertex; 3]> {
    let mut triangles = Vec::new();
    shape.visit_triangles(|t| triangles.push(t));
    triangles
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Returns the bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// of a triangle list.
pub fn bounding_box(triangles: &[[MeshVertex; 3]]) -> [Real; 6] {
    let mut bounds = [
        Real::MAX,
        Real::MAX,
        Real::MAX,
        Real::MIN,
        Real::MIN,
        Real::MIN,
    ];
    for triangle in triangles {
        for vertex in triangle {
            let p = vertex.position;
            bounds[0] = bounds[0].min(p.x);
            bounds[1] = bounds[1].min(p.y);
            bounds[2] = bounds[2].min(p.z);
            bounds[3] = bounds[3].max(p.x);
            bounds[4] = bounds[4].max(p.y);
            bounds[5] = bounds[5].max(p.z);
        }
    }
    bounds
}

fn parse_floats(line: &str) -> [Real; 3] {
    let mut values = line
        .split_whitespace()
        .map(|token| token.parse::<Real>().expect("malformed float in STL"));
    let mut out = [0.0; 3];
    for slot in &mut out {
        *slot = values.next().expect("missing float in STL");
    }
    out
}

/// Minimal ASCII STL reader for round-trip assertions.
pub fn parse_ascii_stl(text: &str) -> Vec<AsciiFacet> {
    let mut facets = Vec::new();
    let mut normal = [0.0; 3];
    let mut vertices: Vec<[Real; 3]> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("facet normal ") {
            normal = parse_floats(rest);
            vertices.clear();
        } else if let Some(rest) = line.strip_prefix("vertex ") {
            vertices.push(parse_floats(rest));
        } else if line == "endfacet" {
            assert_eq!(vertices.len(), 3, "facet without exactly three vertices");
            facets.push(AsciiFacet {
                normal,
                vertices: [vertices[0], vertices[1], vertices[2]],
            });
        }
    }
    facets
}

fn snap(p: &[Real; 3]) -> (i64, i64, i64) {
    let scale = 1.0 / SNAP_EPSILON;
    (
        (p[0] * scale).round() as i64,
        (p[1] * scale).round() as i64,
        (p[2] * scale).round() as i64,
    )
}

/// Number of quantized edges not used exactly once per direction.
/// Zero means the triangles close into a consistently wound, watertight
/// surface.
pub fn unmatched_edge_count(triangles: &[[[Real; 3]; 3]]) -> usize {
    let mut edges: HashMap<((i64, i64, i64), (i64, i64, i64)), (u32, u32)> = HashMap::new();
    for triangle in triangles {
        for i in 0..3 {
            let a = snap(&triangle[i]);
            let b = snap(&triangle[(i + 1) % 3]);
            assert_ne!(a, b, "degenerate triangle edge at {:?}", triangle[i]);
            let (key, forward) = if a < b { ((a, b), true) } else { ((b, a), false) };
            let entry = edges.entry(key).or_insert((0u32, 0u32));
            if forward {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
    }
    edges
        .values()
        .filter(|(forward, reverse)| *forward != 1 || *reverse != 1)
        .count()
}

/// Positions-only view of a triangle list.
pub fn positions(triangles: &[[MeshVertex; 3]]) -> Vec<[[Real; 3]; 3]> {
    triangles
        .iter()
        .map(|t| {
            [
                [t[0].position.x, t[0].position.y, t[0].position.z],
                [t[1].position.x, t[1].position.y, t[1].position.z],
                [t[2].position.x, t[2].position.y, t[2].position.z],
            ]
        })
        .collect()
}

/// Signed volume enclosed by the triangles, via the divergence theorem.
/// Positive for closed surfaces wound counterclockwise seen from outside.
pub fn signed_volume(triangles: &[[[Real; 3]; 3]]) -> Real {
    let mut volume = 0.0;
    for [a, b, c] in triangles {
        let cross = [
            b[1] * c[2] - b[2] * c[1],
            b[2] * c[0] - b[0] * c[2],
            b[0] * c[1] - b[1] * c[0],
        ];
        volume += (a[0] * cross[0] + a[1] * cross[1] + a[2] * cross[2]) / 6.0;
    }
    volume
}
