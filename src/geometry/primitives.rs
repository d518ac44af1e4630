// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Primitive solid generators
//!
//! All primitives are centered on the origin and emit polygon faces, not
//! pre-triangulated meshes: cuboids are six quads and cylinder caps are
//! single n-gons, so downstream fan triangulation does real work.

use super::polygon::Polygon;
use super::solid::Solid;
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

pub const DEFAULT_SEGMENTS: u32 = 32;

/// Axis-aligned box centered on the origin, one quad per face.
pub fn cuboid(size: Vector3<f64>) -> Solid {
    let h = size / 2.0;
    let corner = |i: usize| {
        Point3::new(
            if i & 1 != 0 { h.x } else { -h.x },
            if i & 2 != 0 { h.y } else { -h.y },
            if i & 4 != 0 { h.z } else { -h.z },
        )
    };

    // Outward-wound faces over the 8 corners (bit 0 = x, 1 = y, 2 = z).
    let faces: [[usize; 4]; 6] = [
        [0, 4, 6, 2], // -x
        [1, 3, 7, 5], // +x
        [0, 1, 5, 4], // -y
        [2, 6, 7, 3], // +y
        [0, 2, 3, 1], // -z
        [4, 5, 7, 6], // +z
    ];

    Solid::from_polygons(
        faces
            .iter()
            .map(|face| Polygon::new(face.iter().map(|&i| corner(i)).collect()))
            .collect(),
    )
}

/// UV sphere: quads between the poles, triangles at them.
pub fn sphere(radius: f64, segments: u32) -> Solid {
    let slices = segments.max(4);
    let stacks = (slices / 2).max(2);

    let vertex = |i: u32, j: u32| {
        let theta = 2.0 * PI * f64::from(i) / f64::from(slices);
        let phi = PI * f64::from(j) / f64::from(stacks);
        Point3::new(
            radius * theta.sin() * phi.sin(),
            radius * theta.cos() * phi.sin(),
            radius * phi.cos(),
        )
    };

    let mut polygons = Vec::new();
    for i in 0..slices {
        for j in 0..stacks {
            let mut vertices = Vec::with_capacity(4);
            vertices.push(vertex(i, j));
            if j > 0 {
                vertices.push(vertex(i + 1, j));
            }
            if j < stacks - 1 {
                vertices.push(vertex(i + 1, j + 1));
            }
            vertices.push(vertex(i, j + 1));
            polygons.push(Polygon::new(vertices));
        }
    }
    Solid::from_polygons(polygons)
}

/// Right circular cylinder along z, centered on the origin. Side faces
/// are quads; each cap is a single n-gon.
pub fn cylinder(radius: f64, height: f64, segments: u32) -> Solid {
    let slices = segments.max(3);
    let h = height / 2.0;
    let rim = |i: u32, z: f64| {
        let angle = 2.0 * PI * f64::from(i % slices) / f64::from(slices);
        Point3::new(radius * angle.cos(), radius * angle.sin(), z)
    };

    let mut polygons = Vec::new();
    for i in 0..slices {
        polygons.push(Polygon::new(vec![
            rim(i, -h),
            rim(i + 1, -h),
            rim(i + 1, h),
            rim(i, h),
        ]));
    }
    // Top cap counterclockwise from +z, bottom cap reversed.
    polygons.push(Polygon::new((0..slices).map(|i| rim(i, h)).collect()));
    polygons.push(Polygon::new((0..slices).rev().map(|i| rim(i, -h)).collect()));

    Solid::from_polygons(polygons)
}

/// Box with filleted edges and corners, centered on the origin.
///
/// Built as the surface of the Minkowski sum of an inner box and a sphere
/// of the fillet radius: a UV sphere whose vertices are pushed outward,
/// per octant, by the inner half-extents. Segment count is snapped to a
/// multiple of four so the seams land exactly on the symmetry planes and
/// the flat regions stay flat.
pub fn rounded_cuboid(size: Vector3<f64>, round_radius: f64, segments: u32) -> Solid {
    let max_radius = size.x.min(size.y).min(size.z) / 2.0;
    let radius = round_radius.min(max_radius);
    if radius <= 0.0 {
        return cuboid(size);
    }

    let inner = Vector3::new(
        (size.x / 2.0 - radius).max(0.0),
        (size.y / 2.0 - radius).max(0.0),
        (size.z / 2.0 - radius).max(0.0),
    );

    let slices = segments.max(8).div_ceil(4) * 4;
    let stacks = slices / 2;

    let octant = |c: f64| {
        if c > 1e-9 {
            1.0
        } else if c < -1e-9 {
            -1.0
        } else {
            0.0
        }
    };

    let vertex = |i: u32, j: u32| {
        let theta = 2.0 * PI * f64::from(i) / f64::from(slices);
        let phi = PI * f64::from(j) / f64::from(stacks);
        let p = Vector3::new(
            radius * theta.sin() * phi.sin(),
            radius * theta.cos() * phi.sin(),
            radius * phi.cos(),
        );
        Point3::new(
            p.x + octant(p.x) * inner.x,
            p.y + octant(p.y) * inner.y,
            p.z + octant(p.z) * inner.z,
        )
    };

    let mut polygons = Vec::new();
    for i in 0..slices {
        for j in 0..stacks {
            let mut vertices = Vec::with_capacity(4);
            vertices.push(vertex(i, j));
            if j > 0 {
                vertices.push(vertex(i + 1, j));
            }
            if j < stacks - 1 {
                vertices.push(vertex(i + 1, j + 1));
            }
            vertices.push(vertex(i, j + 1));
            polygons.push(Polygon::new(vertices));
        }
    }
    Solid::from_polygons(polygons)
}
