// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Structural validation of solids before triangulation
//!
//! The checks are deliberately asymmetric: faces with too few vertices
//! are skipped silently, while a single non-finite coordinate anywhere
//! in an inspected face fails the whole solid. Shape problems are
//! tolerated per-face; numeric corruption never is.

use crate::error::{Error, Result};
use crate::geometry::Solid;

pub fn validate(solid: &Solid) -> Result<()> {
    if solid.is_empty() {
        return Err(Error::EmptySolid);
    }

    let mut valid_vertices = 0usize;
    for polygon in solid.polygons() {
        // Degenerate faces are skipped without inspecting coordinates.
        if polygon.vertices.len() < 3 {
            continue;
        }
        for vertex in &polygon.vertices {
            if !vertex.x.is_finite() || !vertex.y.is_finite() || !vertex.z.is_finite() {
                return Err(Error::NonFiniteVertex);
            }
            valid_vertices += 1;
        }
    }

    if valid_vertices == 0 {
        return Err(Error::NoValidVertices);
    }
    Ok(())
}
