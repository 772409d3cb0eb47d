//! [BSP](https://en.wikipedia.org/wiki/Binary_space_partitioning) tree used
//! for the boolean operations.
//!
//! All traversals are iterative with explicit stacks; the trees built from
//! a full stencil run deep enough that recursion is not worth the risk.

use crate::float_types::Real;
use crate::kernel::plane::{BACK, COPLANAR, FRONT, Plane};
use crate::kernel::polygon::Polygon;

/// A BSP tree node: an optional splitting plane, polygons coplanar with it,
/// and optional front/back subtrees.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub plane: Option<Plane>,
    pub front: Option<Box<Node>>,
    pub back: Option<Box<Node>>,
    pub polygons: Vec<Polygon>,
}

impl Node {
    pub const fn new() -> Self {
        Node {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }

    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Node::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Converts the tree to enclose the complement of its solid.
    pub fn invert(&mut self) {
        let mut stack: Vec<&mut Node> = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons.iter_mut().for_each(|p| p.flip());
            if let Some(plane) = &mut node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Heuristic splitter choice: sample candidate planes and score them by
    /// spanning count and front/back balance.
    fn pick_splitting_plane(polygons: &[Polygon]) -> Plane {
        const K_SPANS: Real = 8.0;
        const K_BALANCE: Real = 1.0;

        let mut best_plane = polygons[0].plane.clone();
        let mut best_score = Real::MAX;

        let sample_size = polygons.len().min(20);
        for candidate in polygons.iter().take(sample_size) {
            let plane = &candidate.plane;
            let mut num_front: i32 = 0;
            let mut num_back: i32 = 0;
            let mut num_spanning: i32 = 0;

            for polygon in polygons {
                match plane.classify_polygon(polygon) {
                    COPLANAR => {},
                    FRONT => num_front += 1,
                    BACK => num_back += 1,
                    _ => num_spanning += 1,
                }
            }

            let score = K_SPANS * num_spanning as Real
                + K_BALANCE * ((num_front - num_back) as Real).abs();
            if score < best_score {
                best_score = score;
                best_plane = plane.clone();
            }
        }
        best_plane
    }

    /// Removes from `polygons` everything inside this tree's solid,
    /// splitting spanning polygons along the way.
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            let Some(plane) = node.plane.as_ref() else {
                result.extend(polys);
                continue;
            };

            let mut front_polys = Vec::with_capacity(polys.len());
            let mut back_polys = Vec::with_capacity(polys.len());

            for polygon in &polys {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon);

                for coplanar in coplanar_front.into_iter().chain(coplanar_back) {
                    if plane.orient_plane(&coplanar.plane) == FRONT {
                        front_parts.push(coplanar);
                    } else {
                        back_parts.push(coplanar);
                    }
                }

                front_polys.append(&mut front_parts);
                back_polys.append(&mut back_parts);
            }

            if let Some(front_node) = &node.front {
                if !front_polys.is_empty() {
                    stack.push((front_node, front_polys));
                }
            } else {
                result.extend(front_polys);
            }

            // No back child means the back half-space is inside the solid,
            // so those fragments are dropped.
            if let Some(back_node) = &node.back {
                if !back_polys.is_empty() {
                    stack.push((back_node, back_polys));
                }
            }
        }
        result
    }

    /// Clips every polygon stored in this tree against `bsp`.
    pub fn clip_to(&mut self, bsp: &Node) {
        let mut stack: Vec<&mut Node> = vec![self];
        while let Some(node) = stack.pop() {
            node.polygons = bsp.clip_polygons(&node.polygons);
            if let Some(front) = node.front.as_deref_mut() {
                stack.push(front);
            }
            if let Some(back) = node.back.as_deref_mut() {
                stack.push(back);
            }
        }
    }

    /// Collects every polygon stored anywhere in the tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            stack.extend(
                [&node.front, &node.back]
                    .iter()
                    .filter_map(|child| child.as_deref()),
            );
        }
        result
    }

    /// Inserts `polygons` into the tree, creating child nodes as needed.
    pub fn build(&mut self, polygons: &[Polygon]) {
        if polygons.is_empty() {
            return;
        }

        let mut stack = vec![(self, polygons.to_vec())];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            if node.plane.is_none() {
                node.plane = Some(Node::pick_splitting_plane(&polys));
            }
            let Some(plane) = node.plane.as_ref() else {
                continue;
            };

            let mut front = Vec::with_capacity(polys.len() / 2);
            let mut back = Vec::with_capacity(polys.len() / 2);

            for polygon in &polys {
                let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                    plane.split_polygon(polygon);

                node.polygons.extend(coplanar_front);
                node.polygons.extend(coplanar_back);
                front.append(&mut front_parts);
                back.append(&mut back_parts);
            }

            if !front.is_empty() {
                let front_node = node.front.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((front_node, front));
            }
            if !back.is_empty() {
                let back_node = node.back.get_or_insert_with(|| Box::new(Node::new()));
                stack.push((back_node, back));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangulated::MeshVertex;
    use nalgebra::{Point3, Vector3};

    fn triangle() -> Polygon {
        Polygon::new(vec![
            MeshVertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::z()),
            MeshVertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            MeshVertex::new(Point3::new(0.5, 1.0, 0.0), Vector3::z()),
        ])
    }

    #[test]
    fn build_and_collect_round_trips_polygons() {
        let node = Node::from_polygons(&[triangle()]);
        assert_eq!(node.all_polygons().len(), 1);
    }

    #[test]
    fn invert_flips_every_stored_polygon() {
        let mut node = Node::from_polygons(&[triangle()]);
        let before = node.all_polygons()[0].plane.normal;
        node.invert();
        let after = node.all_polygons()[0].plane.normal;
        assert_eq!(after, -before);
    }

    #[test]
    fn clipping_against_self_keeps_boundary_polygons() {
        let node = Node::from_polygons(&[triangle()]);
        let kept = node.clip_polygons(&[triangle()]);
        assert!(!kept.is_empty());
    }
}
