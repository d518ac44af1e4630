// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

use super::plane::Plane;
use nalgebra::{Point3, Vector3};

/// A single boundary face: an ordered vertex loop plus its supporting
/// plane. Faces with fewer than three vertices are representable (the
/// validator skips them) but carry a degenerate plane.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub vertices: Vec<Point3<f64>>,
    pub plane: Plane,
}

impl Polygon {
    pub fn new(vertices: Vec<Point3<f64>>) -> Self {
        let plane = if vertices.len() >= 3 {
            Plane::from_points(&vertices[0], &vertices[1], &vertices[2])
        } else {
            Plane::new(Vector3::zeros(), 0.0)
        };
        Self { vertices, plane }
    }

    /// Reverse orientation: vertex order and plane both flip.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plane_follows_winding() {
        let mut poly = Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        assert_relative_eq!(poly.plane.normal.z, 1.0);
        poly.flip();
        assert_relative_eq!(poly.plane.normal.z, -1.0);
    }
}
