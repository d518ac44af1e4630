// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Fan triangulation and the renderable mesh buffer
//!
//! Each polygon face with n >= 3 vertices becomes n - 2 triangles
//! fanned out from vertex 0. Normals are flat: one face normal per
//! triangle, repeated for all three of its vertices.

use crate::error::{Error, Result};
use crate::geometry::Solid;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Flat position/normal arrays ready for a renderer. Lengths are always
/// equal and divisible by 9 (three vertices of three components per
/// triangle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshBuffer {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
}

impl MeshBuffer {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }
}

/// Build a flat-shaded triangle mesh from a validated solid.
pub fn triangulate(solid: &Solid) -> Result<MeshBuffer> {
    let mut positions = Vec::new();
    let mut normals = Vec::new();

    for polygon in solid.polygons() {
        let vertices = &polygon.vertices;
        if vertices.len() < 3 {
            continue;
        }
        for i in 1..vertices.len() - 1 {
            let a = vertices[0];
            let b = vertices[i];
            let c = vertices[i + 1];
            let normal = flat_normal(&a, &b, &c);
            for vertex in [a, b, c] {
                positions.push(vertex.x as f32);
                positions.push(vertex.y as f32);
                positions.push(vertex.z as f32);
                normals.push(normal.x as f32);
                normals.push(normal.y as f32);
                normals.push(normal.z as f32);
            }
        }
    }

    if positions.is_empty() {
        return Err(Error::EmptyTriangulation);
    }
    Ok(MeshBuffer { positions, normals })
}

/// Normal of the triangle (a, b, c): normalized (c - b) x (a - b).
/// Degenerate triangles get a zero normal rather than NaN components.
fn flat_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    let cross = (c - b).cross(&(a - b));
    let norm = cross.norm();
    if norm > 0.0 {
        cross / norm
    } else {
        Vector3::zeros()
    }
}

/// Single owned slot for the currently displayed mesh.
///
/// At most one mesh is live at a time; installing a replacement drops
/// the prior buffers first, so repeated renders cannot accumulate.
#[derive(Debug, Default)]
pub struct MeshSlot {
    current: Option<MeshBuffer>,
}

impl MeshSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the prior mesh, then take ownership of the new one.
    pub fn install(&mut self, mesh: MeshBuffer) -> &MeshBuffer {
        if let Some(previous) = self.current.take() {
            drop(previous);
        }
        self.current.insert(mesh)
    }

    pub fn current(&self) -> Option<&MeshBuffer> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{primitives, Polygon};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn ngon_fans_into_n_minus_2_triangles() {
        // Planar hexagon in the xy plane.
        let vertices = (0..6)
            .map(|i| {
                let angle = std::f64::consts::TAU * f64::from(i) / 6.0;
                Point3::new(angle.cos(), angle.sin(), 0.0)
            })
            .collect();
        let solid = Solid::from_polygons(vec![Polygon::new(vertices)]);
        let mesh = triangulate(&solid).unwrap();
        assert_eq!(mesh.triangle_count(), 4);

        // Every fan triangle starts at vertex 0 of the face.
        let v0 = [
            mesh.positions[0],
            mesh.positions[1],
            mesh.positions[2],
        ];
        for t in 0..mesh.triangle_count() {
            assert_eq!(&mesh.positions[t * 9..t * 9 + 3], &v0);
        }
    }

    #[test]
    fn buffers_are_parallel_and_triangle_aligned() {
        let mesh = triangulate(&primitives::cuboid(nalgebra::Vector3::repeat(2.0))).unwrap();
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.positions.len() % 9, 0);
        // 6 quad faces, 2 triangles each.
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn normals_are_flat_and_unit_length() {
        let solid = Solid::from_polygons(vec![Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])]);
        let mesh = triangulate(&solid).unwrap();
        // Counter-clockwise in the xy plane faces +z.
        for v in 0..3 {
            assert_relative_eq!(mesh.normals[v * 3], 0.0);
            assert_relative_eq!(mesh.normals[v * 3 + 1], 0.0);
            assert_relative_eq!(mesh.normals[v * 3 + 2], 1.0);
        }
    }

    #[test]
    fn all_degenerate_faces_is_empty_triangulation() {
        let edge = Polygon::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]);
        let solid = Solid::from_polygons(vec![edge]);
        assert!(matches!(
            triangulate(&solid),
            Err(Error::EmptyTriangulation)
        ));
    }

    #[test]
    fn slot_replaces_rather_than_accumulates() {
        let mut slot = MeshSlot::new();
        assert!(slot.current().is_none());

        let first = triangulate(&primitives::cuboid(nalgebra::Vector3::repeat(1.0))).unwrap();
        let second = triangulate(&primitives::cuboid(nalgebra::Vector3::repeat(2.0))).unwrap();
        slot.install(first);
        slot.install(second);

        let current = slot.current().unwrap();
        assert_relative_eq!(current.positions.iter().fold(f32::MIN, |m, &v| m.max(v)), 1.0);

        slot.clear();
        assert!(slot.current().is_none());
    }
}
