// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Homogeneous transform constructors

use nalgebra::{Matrix4, UnitQuaternion, Vector3};

pub fn translation(offset: Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_translation(&offset)
}

/// Euler rotation in radians, applied x then y then z.
pub fn rotation(angles: Vector3<f64>) -> Matrix4<f64> {
    let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x);
    let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y);
    let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z);
    (rz * ry * rx).to_homogeneous()
}

pub fn scaling(factors: Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_nonuniform_scaling(&factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::cuboid;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn translate_moves_every_vertex() {
        let solid = cuboid(Vector3::new(2.0, 2.0, 2.0))
            .transform(&translation(Vector3::new(10.0, 0.0, 0.0)));
        for polygon in solid.polygons() {
            for v in &polygon.vertices {
                assert!(v.x >= 9.0 - 1e-9);
            }
        }
    }

    #[test]
    fn rotate_quarter_turn_about_z() {
        let solid = cuboid(Vector3::new(4.0, 2.0, 2.0))
            .transform(&rotation(Vector3::new(0.0, 0.0, FRAC_PI_2)));
        let max_y = solid
            .polygons()
            .iter()
            .flat_map(|p| &p.vertices)
            .fold(f64::MIN, |m, v| m.max(v.y));
        assert_relative_eq!(max_y, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn mirror_scale_keeps_faces_outward() {
        let solid =
            cuboid(Vector3::new(2.0, 2.0, 2.0)).transform(&scaling(Vector3::new(-1.0, 1.0, 1.0)));
        for polygon in solid.polygons() {
            let centroid = polygon
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.coords)
                / polygon.vertices.len() as f64;
            assert!(polygon.plane.normal.dot(&centroid) > 0.0);
        }
    }
}
