//! Solids bounded by BSP polygons, with boolean ops and prism extrusion.

use crate::float_types::{Real, SNAP_EPSILON};
use crate::kernel::bsp::Node;
use crate::kernel::polygon::Polygon;
use crate::triangulated::{MeshVertex, Triangulated3D};
use geo::{Polygon as GeoPolygon, TriangulateEarcut};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

/// Spatial bucket size for the T-junction vertex search, millimeters.
const HEAL_CELL: Real = 1.0;

/// A closed solid represented by its boundary polygons.
///
/// Polygons wind counterclockwise seen from outside. Operations never
/// mutate their inputs; they build fresh BSP trees per call.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    pub polygons: Vec<Polygon>,
}

impl Solid {
    pub const fn new() -> Self {
        Solid {
            polygons: Vec::new(),
        }
    }

    pub const fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Solid { polygons }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Boolean union of two solids.
    pub fn union(&self, other: &Solid) -> Solid {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        Solid::from_polygons(a.all_polygons())
    }

    /// Boolean difference, removing `other` from this solid.
    pub fn difference(&self, other: &Solid) -> Solid {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        Solid::from_polygons(a.all_polygons())
    }

    /// Extrudes a 2D profile along +Z from `z_bottom` to `z_top`.
    ///
    /// Caps are earcut-triangulated, walls come from the exterior ring as
    /// one quad per segment. Interior rings become holes through the prism.
    pub fn extrude_polygon(profile: &GeoPolygon<Real>, z_bottom: Real, z_top: Real) -> Solid {
        let mut polygons = Vec::new();

        let triangulation = profile.earcut_triangles_raw();
        let coord = |index: usize| {
            (
                triangulation.vertices[2 * index],
                triangulation.vertices[2 * index + 1],
            )
        };
        for tri in triangulation.triangle_indices.chunks_exact(3) {
            let a = coord(tri[0]);
            let b = coord(tri[1]);
            let c = coord(tri[2]);
            // Normalize to counterclockwise in the XY plane.
            let doubled_area = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
            let (a, b, c) = if doubled_area >= 0.0 { (a, b, c) } else { (a, c, b) };

            let top = |p: (Real, Real)| {
                MeshVertex::new(Point3::new(p.0, p.1, z_top), Vector3::z())
            };
            polygons.push(Polygon::new(vec![top(a), top(b), top(c)]));

            let bottom = |p: (Real, Real)| {
                MeshVertex::new(Point3::new(p.0, p.1, z_bottom), -Vector3::z())
            };
            polygons.push(Polygon::new(vec![bottom(a), bottom(c), bottom(b)]));
        }

        wall_quads(profile.exterior().0.as_slice(), z_bottom, z_top, false, &mut polygons);
        for interior in profile.interiors() {
            wall_quads(interior.0.as_slice(), z_bottom, z_top, true, &mut polygons);
        }

        Solid::from_polygons(polygons)
    }

    /// Inserts every mesh vertex that lies on another polygon's edge into
    /// that edge, eliminating T-junctions.
    ///
    /// Boolean output is correct as a point set but fragments on one side
    /// of a shared face are split by planes the other side never saw. Both
    /// sides of an edge see the same global vertex positions here, so after
    /// this pass shared edges match exactly and the quantized edge count of
    /// a closed solid comes out at two everywhere.
    pub fn split_t_junctions(&self) -> Solid {
        let mut points: Vec<Point3<Real>> = Vec::new();
        let mut point_ids: HashMap<(i64, i64, i64), usize> = HashMap::new();
        for polygon in &self.polygons {
            for vertex in &polygon.vertices {
                point_ids.entry(snap_key(&vertex.position)).or_insert_with(|| {
                    points.push(vertex.position);
                    points.len() - 1
                });
            }
        }

        let mut cells: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
        for (index, point) in points.iter().enumerate() {
            cells.entry(heal_cell(point)).or_default().push(index);
        }

        let snap_sq = SNAP_EPSILON * SNAP_EPSILON;
        let healed = self
            .polygons
            .iter()
            .map(|polygon| {
                let n = polygon.vertices.len();
                let mut boundary = Vec::with_capacity(n);
                for i in 0..n {
                    let a = &polygon.vertices[i];
                    let b = &polygon.vertices[(i + 1) % n];
                    boundary.push(*a);

                    let edge = b.position - a.position;
                    let length_sq = edge.norm_squared();
                    if length_sq <= snap_sq {
                        continue;
                    }

                    let mut hits: Vec<(Real, usize)> = Vec::new();
                    for cell in cells_along(&a.position, &b.position) {
                        let Some(bucket) = cells.get(&cell) else {
                            continue;
                        };
                        for &candidate in bucket {
                            let p = points[candidate];
                            let t = (p - a.position).dot(&edge) / length_sq;
                            if t <= 0.0 || t >= 1.0 {
                                continue;
                            }
                            let closest = a.position + edge * t;
                            if (p - closest).norm_squared() > snap_sq
                                || (p - a.position).norm_squared() <= snap_sq
                                || (p - b.position).norm_squared() <= snap_sq
                            {
                                continue;
                            }
                            hits.push((t, candidate));
                        }
                    }
                    hits.sort_by(|x, y| x.0.total_cmp(&y.0));
                    for (t, candidate) in hits {
                        // Take the global position verbatim so both edges
                        // sharing this point emit identical coordinates.
                        let mut inserted = a.interpolate(b, t);
                        inserted.position = points[candidate];
                        boundary.push(inserted);
                    }
                }
                Polygon::with_plane(boundary, polygon.plane.clone())
            })
            .collect();

        Solid::from_polygons(healed)
    }
}

impl Triangulated3D for Solid {
    fn visit_triangles<F>(&self, mut visitor: F)
    where
        F: FnMut([MeshVertex; 3]),
    {
        for polygon in &self.polygons {
            polygon.visit_triangles(&mut visitor);
        }
    }
}

/// Emits one outward-facing wall quad per ring segment.
///
/// `invert` flips the facing for interior rings, whose outward direction
/// points into the hole.
fn wall_quads(
    ring: &[geo::Coord<Real>],
    z_bottom: Real,
    z_top: Real,
    invert: bool,
    polygons: &mut Vec<Polygon>,
) {
    if ring.len() < 2 {
        return;
    }
    // Shoelace over the closed ring; negative means clockwise input.
    let mut doubled_area = 0.0;
    for pair in ring.windows(2) {
        doubled_area += pair[0].x * pair[1].y - pair[1].x * pair[0].y;
    }
    let flip = (doubled_area < 0.0) != invert;

    for pair in ring.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        let dx = q.x - p.x;
        let dy = q.y - p.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length <= SNAP_EPSILON {
            continue;
        }
        let mut normal = Vector3::new(dy / length, -dx / length, 0.0);
        if flip {
            normal = -normal;
        }
        let corner = |x: Real, y: Real, z: Real| MeshVertex::new(Point3::new(x, y, z), normal);
        let mut quad = vec![
            corner(p.x, p.y, z_bottom),
            corner(q.x, q.y, z_bottom),
            corner(q.x, q.y, z_top),
            corner(p.x, p.y, z_top),
        ];
        if flip {
            quad.reverse();
        }
        polygons.push(Polygon::new(quad));
    }
}

fn snap_key(point: &Point3<Real>) -> (i64, i64, i64) {
    let scale = 1.0 / SNAP_EPSILON;
    (
        (point.x * scale).round() as i64,
        (point.y * scale).round() as i64,
        (point.z * scale).round() as i64,
    )
}

fn heal_cell(point: &Point3<Real>) -> (i64, i64, i64) {
    (
        (point.x / HEAL_CELL).floor() as i64,
        (point.y / HEAL_CELL).floor() as i64,
        (point.z / HEAL_CELL).floor() as i64,
    )
}

/// Cells overlapped by the axis-aligned box around an edge, padded by the
/// snap tolerance.
fn cells_along(a: &Point3<Real>, b: &Point3<Real>) -> Vec<(i64, i64, i64)> {
    let range = |u: Real, v: Real| {
        let lo = ((u.min(v) - SNAP_EPSILON) / HEAL_CELL).floor() as i64;
        let hi = ((u.max(v) + SNAP_EPSILON) / HEAL_CELL).floor() as i64;
        lo..=hi
    };
    let mut cells = Vec::new();
    for x in range(a.x, b.x) {
        for y in range(a.y, b.y) {
            for z in range(a.z, b.z) {
                cells.push((x, y, z));
            }
        }
    }
    cells
}
