// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Boundary-representation solid: an ordered collection of polygon faces

use super::bsp::Node;
use super::polygon::Polygon;
use nalgebra::Matrix4;

#[derive(Debug, Clone, Default)]
pub struct Solid {
    polygons: Vec<Polygon>,
}

impl Solid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.polygons
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Apply a homogeneous transform to every vertex. Planes are rebuilt
    /// from the transformed loops; a reflecting transform (negative
    /// determinant) flips the winding to keep faces outward.
    pub fn transform(&self, matrix: &Matrix4<f64>) -> Solid {
        let flip = matrix.determinant() < 0.0;
        let polygons = self
            .polygons
            .iter()
            .map(|polygon| {
                let vertices = polygon
                    .vertices
                    .iter()
                    .map(|v| matrix.transform_point(v))
                    .collect();
                let mut polygon = Polygon::new(vertices);
                if flip {
                    polygon.flip();
                }
                polygon
            })
            .collect();
        Solid::from_polygons(polygons)
    }

    /// Boolean union via BSP clipping.
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

    /// Boolean difference: the space of `self` not inside `other`.
    pub fn subtract(&self, other: &Solid) -> Solid {
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

    /// Boolean intersection.
    pub fn intersect(&self, other: &Solid) -> Solid {
        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Solid::from_polygons(a.all_polygons())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::cuboid;
    use crate::geometry::transforms;
    use nalgebra::Vector3;

    #[test]
    fn union_of_disjoint_cubes_keeps_both() {
        let a = cuboid(Vector3::new(1.0, 1.0, 1.0));
        let b = a.transform(&transforms::translation(Vector3::new(5.0, 0.0, 0.0)));
        let merged = a.union(&b);
        assert!(merged.polygons().len() >= a.polygons().len() + b.polygons().len());
    }

    #[test]
    fn union_of_overlapping_cubes_is_nonempty() {
        let a = cuboid(Vector3::new(2.0, 2.0, 2.0));
        let b = a.transform(&transforms::translation(Vector3::new(1.0, 0.0, 0.0)));
        let merged = a.union(&b);
        assert!(!merged.is_empty());

        // The union spans both cubes along x.
        let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
        for polygon in merged.polygons() {
            for v in &polygon.vertices {
                min_x = min_x.min(v.x);
                max_x = max_x.max(v.x);
            }
        }
        assert!(min_x <= -1.0 + 1e-6);
        assert!(max_x >= 2.0 - 1e-6);
    }

    #[test]
    fn subtract_carves_material() {
        let a = cuboid(Vector3::new(2.0, 2.0, 2.0));
        let b = cuboid(Vector3::new(1.0, 1.0, 4.0));
        let carved = a.subtract(&b);
        assert!(!carved.is_empty());
        // No remaining vertex lies strictly inside the removed channel.
        for polygon in carved.polygons() {
            for v in &polygon.vertices {
                let inside = v.x.abs() < 0.5 - 1e-6 && v.y.abs() < 0.5 - 1e-6;
                assert!(!inside, "vertex {v:?} inside subtracted region");
            }
        }
    }

    #[test]
    fn intersect_of_disjoint_cubes_is_empty() {
        let a = cuboid(Vector3::new(1.0, 1.0, 1.0));
        let b = a.transform(&transforms::translation(Vector3::new(5.0, 0.0, 0.0)));
        assert!(a.intersect(&b).is_empty());
    }
}
