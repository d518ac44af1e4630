// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! ASCII STL serialization
//!
//! STL only carries triangles, so faces are fan-triangulated here with
//! the same flat normals the viewport mesh uses. The finished text is
//! sanity-checked for the solid/endsolid framing before it is accepted.

use crate::error::{Error, Result};
use crate::geometry::Solid;
use crate::mesh::{self, MeshBuffer};

const MIN_PLAUSIBLE_LEN: usize = 100;

/// Serialize a solid as an ASCII STL document.
pub fn serialize_ascii(solid: &Solid, name: &str) -> Result<String> {
    let buffer = mesh::triangulate(solid)?;
    serialize_mesh(&buffer, name)
}

/// Serialize an already-triangulated mesh buffer. Callers that keep the
/// buffer around for display can reuse it here instead of triangulating
/// the solid a second time.
pub fn serialize_mesh(buffer: &MeshBuffer, name: &str) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));
    for t in 0..buffer.triangle_count() {
        let p = &buffer.positions[t * 9..t * 9 + 9];
        let n = &buffer.normals[t * 9..t * 9 + 3];
        out.push_str(&format!(
            "  facet normal {:.6} {:.6} {:.6}\n",
            n[0], n[1], n[2]
        ));
        out.push_str("    outer loop\n");
        for v in 0..3 {
            out.push_str(&format!(
                "      vertex {:.6} {:.6} {:.6}\n",
                p[v * 3],
                p[v * 3 + 1],
                p[v * 3 + 2]
            ));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    out.push_str(&format!("endsolid {name}\n"));

    check_output(&out)?;
    Ok(out)
}

/// Reject output that is missing the STL framing tokens or is too short
/// to plausibly contain a facet.
fn check_output(text: &str) -> Result<()> {
    let lowered = text.to_lowercase();
    let mut tokens = lowered.split_whitespace();
    let has_start = tokens.any(|token| token == "solid");
    let has_end = lowered.split_whitespace().any(|token| token == "endsolid");
    if !has_start || !has_end || text.len() <= MIN_PLAUSIBLE_LEN {
        return Err(Error::InvalidSerialization);
    }
    Ok(())
}
