// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Splitting plane used by the BSP boolean kernel

use super::polygon::Polygon;
use nalgebra::{Point3, Vector3};

/// Classification tolerance for point-vs-plane tests.
pub const EPSILON: f64 = 1e-5;

pub const COPLANAR: u8 = 0;
pub const FRONT: u8 = 1;
pub const BACK: u8 = 2;
pub const SPANNING: u8 = 3;

/// Plane in Hessian normal form: `normal . p == w` for points on the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub w: f64,
}

impl Plane {
    pub fn new(normal: Vector3<f64>, w: f64) -> Self {
        Self { normal, w }
    }

    /// Supporting plane of the triangle `a, b, c`. Degenerate triangles
    /// yield a zero normal; such planes never reach the BSP kernel because
    /// primitives do not emit them.
    pub fn from_points(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Self {
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if len > 0.0 {
            let normal = n / len;
            Self { w: normal.dot(&a.coords), normal }
        } else {
            Self { normal: Vector3::zeros(), w: 0.0 }
        }
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Split `polygon` by this plane. Returns
    /// `(coplanar_front, coplanar_back, front, back)`; spanning polygons
    /// are cut along the plane, with new vertices interpolated on the
    /// crossing edges.
    #[allow(clippy::type_complexity)]
    pub fn split_polygon(
        &self,
        polygon: &Polygon,
    ) -> (Vec<Polygon>, Vec<Polygon>, Vec<Polygon>, Vec<Polygon>) {
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();
        let mut polygon_type = COPLANAR;
        let mut types = Vec::with_capacity(polygon.vertices.len());

        for vertex in &polygon.vertices {
            let t = self.normal.dot(&vertex.coords) - self.w;
            let vertex_type = if t < -EPSILON {
                BACK
            } else if t > EPSILON {
                FRONT
            } else {
                COPLANAR
            };
            polygon_type |= vertex_type;
            types.push(vertex_type);
        }

        match polygon_type {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            }
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                let mut f: Vec<Point3<f64>> = Vec::new();
                let mut b: Vec<Point3<f64>> = Vec::new();

                let count = polygon.vertices.len();
                for i in 0..count {
                    let j = (i + 1) % count;
                    let ti = types[i];
                    let tj = types[j];
                    let vi = polygon.vertices[i];
                    let vj = polygon.vertices[j];

                    if ti != BACK {
                        f.push(vi);
                    }
                    if ti != FRONT {
                        b.push(vi);
                    }
                    if (ti | tj) == SPANNING {
                        let edge = vj - vi;
                        let t = (self.w - self.normal.dot(&vi.coords)) / self.normal.dot(&edge);
                        let v = vi + edge * t;
                        f.push(v);
                        b.push(v);
                    }
                }

                if f.len() >= 3 {
                    front.push(Polygon::new(f));
                }
                if b.len() >= 3 {
                    back.push(Polygon::new(b));
                }
            }
        }

        (coplanar_front, coplanar_back, front, back)
    }
}
