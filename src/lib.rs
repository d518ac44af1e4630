// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Parascope
//!
//! A sandboxed previewer for JSCAD-style modeling scripts. Scripts in a
//! restricted JavaScript-flavored subset are parsed and evaluated under
//! a fixed capability list, their results normalized to a single solid,
//! validated, fan-triangulated into a flat-shaded mesh buffer, and
//! optionally exported as ASCII STL.

pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod normalize;
pub mod preview;
pub mod script;
pub mod validate;

pub use error::{Error, Result};
pub use geometry::Solid;
pub use mesh::{MeshBuffer, MeshSlot};
pub use normalize::normalize;
pub use preview::{PreviewSession, DEFAULT_SCRIPT};
pub use script::{parse_script, Evaluator, Value};
pub use validate::validate;

/// Run evaluation and normalization: source text to one validated solid.
pub fn build_solid(source: &str) -> Result<Solid> {
    let program = parse_script(source)?;
    let value = Evaluator::new().run(&program)?;
    let solid = normalize(value)?;
    validate(&solid)?;
    Ok(solid)
}

/// Full render pipeline: source text to a flat-shaded mesh buffer.
pub fn render(source: &str) -> Result<MeshBuffer> {
    let solid = build_solid(source)?;
    mesh::triangulate(&solid)
}

/// Export pipeline: source text to ASCII STL.
pub fn export_stl(source: &str, name: &str) -> Result<String> {
    let solid = build_solid(source)?;
    io::serialize_ascii(&solid, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_cuboid_renders() {
        let result = render("export const main = () => cuboid({ size: [10, 10, 10] })");
        assert!(result.is_ok());
    }

    #[test]
    fn basic_cuboid_exports() {
        let text =
            export_stl("export const main = () => cuboid({ size: [10, 10, 10] })", "part").unwrap();
        assert!(text.starts_with("solid part"));
    }
}
