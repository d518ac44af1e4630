// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Export path tests: script text in, ASCII STL out.

use parascope::{Error, PreviewSession};

const CUBE_SCRIPT: &str = "export const main = () => cuboid({ size: [20, 20, 20] })";

#[test]
fn cube_export_is_a_plausible_ascii_stl() {
    let text = parascope::export_stl(CUBE_SCRIPT, "preview").unwrap();

    let lowered = text.to_lowercase();
    assert!(lowered.starts_with("solid"));
    assert!(lowered.trim_end().ends_with("endsolid preview"));
    assert!(text.len() > 100);
}

#[test]
fn cube_export_has_twelve_facets() {
    let text = parascope::export_stl(CUBE_SCRIPT, "preview").unwrap();
    assert_eq!(text.matches("facet normal").count(), 12);
    assert_eq!(text.matches("outer loop").count(), 12);
}

#[test]
fn facet_lines_carry_six_decimal_coordinates() {
    let text = parascope::export_stl(CUBE_SCRIPT, "preview").unwrap();
    let vertex_line = text
        .lines()
        .find(|line| line.trim_start().starts_with("vertex"))
        .unwrap();
    let components: Vec<&str> = vertex_line.split_whitespace().skip(1).collect();
    assert_eq!(components.len(), 3);
    for component in components {
        let (_, decimals) = component.split_once('.').unwrap();
        assert_eq!(decimals.trim_start_matches('-').len(), 6);
    }
}

#[test]
fn serializing_a_rendered_mesh_matches_the_solid_path() {
    // A caller holding the rendered buffer can serialize it directly
    // without running the pipeline again.
    let solid = parascope::build_solid(CUBE_SCRIPT).unwrap();
    let mesh = parascope::mesh::triangulate(&solid).unwrap();

    let from_mesh = parascope::io::serialize_mesh(&mesh, "preview").unwrap();
    let from_solid = parascope::io::serialize_ascii(&solid, "preview").unwrap();
    assert_eq!(from_mesh, from_solid);
}

#[test]
fn export_fails_like_render_for_broken_scripts() {
    let result = parascope::export_stl("const a = 1", "preview");
    assert!(matches!(result, Err(Error::NoEntryPoint)));
}

#[test]
fn export_follows_buffer_edits_made_after_the_last_render() {
    let mut session = PreviewSession::new();
    session.set_script(CUBE_SCRIPT);
    session.render().unwrap();

    session.set_script("export const main = () => cuboid({ size: [2, 2, 2] })");
    let text = session.export_stl("preview").unwrap();
    // The export reflects the smaller cube, not the rendered one.
    assert!(text.contains("1.000000"));
    assert!(!text.contains("10.000000"));
}

#[test]
fn exported_rounded_cuboid_is_heavier_than_a_plain_cube() {
    let rounded = parascope::export_stl(
        "export const main = () => roundedCuboid({ size: [20, 20, 20], roundRadius: 2, segments: 16 })",
        "preview",
    )
    .unwrap();
    let plain = parascope::export_stl(CUBE_SCRIPT, "preview").unwrap();
    assert!(rounded.matches("facet normal").count() > plain.matches("facet normal").count());
}
