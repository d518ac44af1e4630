// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! BSP tree node and the clip sequences behind the boolean operations

use super::polygon::Polygon;
use crate::geometry::plane::Plane;

/// BSP tree node: a splitting plane, front/back subtrees, and the
/// polygons coplanar with the node's plane.
#[derive(Debug, Clone, Default)]
pub struct Node {
    plane: Option<Plane>,
    front: Option<Box<Node>>,
    back: Option<Box<Node>>,
    polygons: Vec<Polygon>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_polygons(polygons: &[Polygon]) -> Self {
        let mut node = Self::new();
        if !polygons.is_empty() {
            node.build(polygons);
        }
        node
    }

    /// Convert solid space to empty space and vice versa.
    pub fn invert(&mut self) {
        for polygon in &mut self.polygons {
            polygon.flip();
        }
        if let Some(plane) = &mut self.plane {
            plane.flip();
        }
        if let Some(front) = &mut self.front {
            front.invert();
        }
        if let Some(back) = &mut self.back {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Remove the parts of `polygons` that lie inside this tree's solid.
    pub fn clip_polygons(&self, polygons: &[Polygon]) -> Vec<Polygon> {
        let Some(plane) = &self.plane else {
            return polygons.to_vec();
        };

        let mut front = Vec::with_capacity(polygons.len());
        let mut back = Vec::with_capacity(polygons.len());
        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                plane.split_polygon(polygon);
            // Coplanar pieces stay with the half-space they face.
            front.extend(coplanar_front);
            back.extend(coplanar_back);
            front.append(&mut front_parts);
            back.append(&mut back_parts);
        }

        let mut result = match &self.front {
            Some(node) => node.clip_polygons(&front),
            None => front,
        };
        match &self.back {
            Some(node) => result.extend(node.clip_polygons(&back)),
            // No back subtree: back polygons are inside the solid.
            None => {}
        }
        result
    }

    /// Clip every polygon stored in this tree against `bsp`.
    pub fn clip_to(&mut self, bsp: &Node) {
        self.polygons = bsp.clip_polygons(&self.polygons);
        if let Some(front) = &mut self.front {
            front.clip_to(bsp);
        }
        if let Some(back) = &mut self.back {
            back.clip_to(bsp);
        }
    }

    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            result.extend_from_slice(&node.polygons);
            if let Some(front) = &node.front {
                stack.push(front);
            }
            if let Some(back) = &node.back {
                stack.push(back);
            }
        }
        result
    }

    /// Insert polygons, using the first polygon's plane as the splitter
    /// for a fresh node.
    pub fn build(&mut self, polygons: &[Polygon]) {
        if polygons.is_empty() {
            return;
        }
        let plane = self
            .plane
            .get_or_insert_with(|| polygons[0].plane.clone())
            .clone();

        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in polygons {
            let (coplanar_front, coplanar_back, mut front_parts, mut back_parts) =
                plane.split_polygon(polygon);
            self.polygons.extend(coplanar_front);
            self.polygons.extend(coplanar_back);
            front.append(&mut front_parts);
            back.append(&mut back_parts);
        }

        if !front.is_empty() {
            self.front
                .get_or_insert_with(|| Box::new(Node::new()))
                .build(&front);
        }
        if !back.is_empty() {
            self.back
                .get_or_insert_with(|| Box::new(Node::new()))
                .build(&back);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::cuboid;
    use nalgebra::Vector3;

    #[test]
    fn roundtrip_preserves_polygons() {
        let cube = cuboid(Vector3::new(2.0, 2.0, 2.0));
        let node = Node::from_polygons(cube.polygons());
        // Building may split faces, but nothing may be lost entirely.
        assert!(node.all_polygons().len() >= cube.polygons().len());
    }

    #[test]
    fn incremental_build_keeps_the_existing_splitter() {
        let cube = cuboid(Vector3::new(2.0, 2.0, 2.0));
        let mut node = Node::from_polygons(cube.polygons());
        let before = node.all_polygons().len();

        let far = cube.transform(&crate::geometry::transforms::translation(Vector3::new(
            5.0, 0.0, 0.0,
        )));
        node.build(far.polygons());
        // Inserting into a built tree splits against the existing planes;
        // nothing already stored may be lost.
        assert!(node.all_polygons().len() >= before + far.polygons().len());
    }

    #[test]
    fn double_invert_is_identity_on_counts() {
        let cube = cuboid(Vector3::new(2.0, 2.0, 2.0));
        let mut node = Node::from_polygons(cube.polygons());
        let before = node.all_polygons().len();
        node.invert();
        node.invert();
        assert_eq!(node.all_polygons().len(), before);
    }
}
