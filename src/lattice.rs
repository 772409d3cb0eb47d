//! Flat-top hex lattice spanning the usable plate area.
//!
//! Hex centers sit on the standard flat-top tiling: columns spaced
//! `1.5 * side` apart in X, rows spaced one flat-to-flat pitch apart in Y,
//! with every other column shifted down half a pitch. Corners of adjacent
//! hexes then coincide exactly, so vertices and edges are deduplicated by
//! quantized position into shared lattice elements: a vertex joins up to
//! three hexes, an edge up to two.
//!
//! Only whole hexes are kept. A hex with any corner outside the usable
//! rectangle is dropped entirely, so the stencil never shows partial cells.

use crate::config::StencilConfig;
use crate::float_types::{Real, SNAP_EPSILON, TAU};
use hashbrown::HashMap;
use nalgebra::Point2;
use tracing::debug;

/// Coordinates are rounded to integer multiples of [`SNAP_EPSILON`] before
/// being used as identity keys.
fn snap_key(p: &Point2<Real>) -> (i64, i64) {
    let scale = 1.0 / SNAP_EPSILON;
    ((p.x * scale).round() as i64, (p.y * scale).round() as i64)
}

/// A deduplicated lattice vertex, shared by up to three hexes.
#[derive(Debug, Clone)]
pub struct LatticeVertex {
    pub position: Point2<Real>,
    /// Indices into [`HexLattice::edges`] of the incident edges, sorted by
    /// outgoing direction angle so downstream consumers see a stable order.
    pub edges: Vec<usize>,
    /// Ids of every hex meeting at this vertex.
    pub hexes: Vec<u32>,
}

/// A deduplicated lattice edge, shared by up to two hexes.
#[derive(Debug, Clone)]
pub struct LatticeEdge {
    /// Indices into [`HexLattice::vertices`], canonically ordered low first.
    pub vertices: [usize; 2],
    /// Ids of every hex bordering this edge.
    pub hexes: Vec<u32>,
}

/// Deduplicated vertex and edge sets for one stencil configuration.
#[derive(Debug, Clone)]
pub struct HexLattice {
    side: Real,
    hex_count: usize,
    vertices: Vec<LatticeVertex>,
    edges: Vec<LatticeEdge>,
}

impl HexLattice {
    /// Generate the lattice for `config`. Deterministic: the same
    /// configuration always yields the same elements in the same order.
    pub fn generate(config: &StencilConfig) -> Self {
        let side = config.hex_side();
        let pitch = config.hex_flat_to_flat;
        let col_spacing = 1.5 * side;
        let row_spacing = pitch;

        let half_w = config.usable_width() / 2.0;
        let half_h = config.usable_height() / 2.0;

        // One extra ring of candidates beyond the usable area; the
        // whole-hex filter trims the excess.
        let col_limit = (half_w / col_spacing).ceil() as i64 + 1;
        let row_limit = (half_h / row_spacing).ceil() as i64 + 1;

        let mut vertices: Vec<LatticeVertex> = Vec::new();
        let mut edges: Vec<LatticeEdge> = Vec::new();
        let mut vertex_keys: HashMap<(i64, i64), usize> = HashMap::new();
        let mut edge_keys: HashMap<(usize, usize), usize> = HashMap::new();
        let mut hex_count = 0usize;

        for col in -col_limit..=col_limit {
            let center_x = col as Real * col_spacing;
            let y_offset = if col.rem_euclid(2) == 1 {
                row_spacing / 2.0
            } else {
                0.0
            };
            for row in -row_limit..=row_limit {
                let center = Point2::new(center_x, row as Real * row_spacing + y_offset);
                let corners = hex_corners(&center, side);

                let inside = corners.iter().all(|c| {
                    c.x.abs() <= half_w + SNAP_EPSILON && c.y.abs() <= half_h + SNAP_EPSILON
                });
                if !inside {
                    continue;
                }

                let hex_id = hex_count as u32;
                hex_count += 1;

                let corner_indices: Vec<usize> = corners
                    .iter()
                    .map(|corner| {
                        let index = *vertex_keys.entry(snap_key(corner)).or_insert_with(|| {
                            vertices.push(LatticeVertex {
                                position: *corner,
                                edges: Vec::new(),
                                hexes: Vec::new(),
                            });
                            vertices.len() - 1
                        });
                        vertices[index].hexes.push(hex_id);
                        index
                    })
                    .collect();

                for k in 0..6 {
                    let a = corner_indices[k];
                    let b = corner_indices[(k + 1) % 6];
                    let key = (a.min(b), a.max(b));
                    let index = *edge_keys.entry(key).or_insert_with(|| {
                        edges.push(LatticeEdge {
                            vertices: [key.0, key.1],
                            hexes: Vec::new(),
                        });
                        vertices[key.0].edges.push(edges.len() - 1);
                        vertices[key.1].edges.push(edges.len() - 1);
                        edges.len() - 1
                    });
                    edges[index].hexes.push(hex_id);
                }
            }
        }

        sort_incident_edges(&mut vertices, &edges);

        debug!(
            hexes = hex_count,
            vertices = vertices.len(),
            edges = edges.len(),
            "generated hex lattice"
        );

        Self {
            side,
            hex_count,
            vertices,
            edges,
        }
    }

    /// Hex side length, which is also the length of every lattice edge.
    pub const fn side(&self) -> Real {
        self.side
    }

    /// Number of whole hexes kept inside the usable rectangle.
    pub const fn hex_count(&self) -> usize {
        self.hex_count
    }

    pub const fn is_empty(&self) -> bool {
        self.hex_count == 0
    }

    pub fn vertices(&self) -> &[LatticeVertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[LatticeEdge] {
        &self.edges
    }

    /// Endpoint positions of `edge`, in canonical order.
    pub fn edge_endpoints(&self, edge: &LatticeEdge) -> [Point2<Real>; 2] {
        [
            self.vertices[edge.vertices[0]].position,
            self.vertices[edge.vertices[1]].position,
        ]
    }
}

/// Corners of a flat-top hex: radius `side`, angles 0°, 60°, ... 300°.
fn hex_corners(center: &Point2<Real>, side: Real) -> [Point2<Real>; 6] {
    core::array::from_fn(|k| {
        let angle = TAU * k as Real / 6.0;
        Point2::new(
            center.x + side * angle.cos(),
            center.y + side * angle.sin(),
        )
    })
}

/// Order each vertex's incident edges by the angle of the outgoing
/// direction, so arm generation and tests see a stable arrangement.
fn sort_incident_edges(vertices: &mut [LatticeVertex], edges: &[LatticeEdge]) {
    let sorted: Vec<Vec<usize>> = vertices
        .iter()
        .enumerate()
        .map(|(v_idx, vertex)| {
            let mut with_angle: Vec<(Real, usize)> = vertex
                .edges
                .iter()
                .map(|&e_idx| {
                    let edge = &edges[e_idx];
                    let other = if edge.vertices[0] == v_idx {
                        edge.vertices[1]
                    } else {
                        edge.vertices[0]
                    };
                    let d = vertices[other].position - vertex.position;
                    (d.y.atan2(d.x), e_idx)
                })
                .collect();
            with_angle.sort_by(|a, b| a.0.total_cmp(&b.0));
            with_angle.into_iter().map(|(_, e)| e).collect()
        })
        .collect();

    for (vertex, list) in vertices.iter_mut().zip(sorted) {
        vertex.edges = list;
    }
}
