// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Preview session: the script buffer and the currently displayed mesh
//!
//! One session corresponds to one open preview. The script buffer is
//! seeded with a default example, may be replaced wholesale from a
//! file, and feeds every render and export. Renders that fail leave
//! the previously displayed mesh untouched.

use crate::error::Result;
use crate::io;
use crate::mesh::{MeshBuffer, MeshSlot};
use std::path::Path;

/// Example script the buffer starts out with: a 20 mm cube with 2 mm
/// fillets on all edges.
pub const DEFAULT_SCRIPT: &str = "\
// 20 mm cube with 2 mm fillets on all edges
//
// NOTE: imports are ignored in this preview; primitives are provided
// by the sandbox.
// import { roundedCuboid } from '@jscad/modeling'

const size = 20
const filletRadius = 2
const segments = 32

export const main = () => {
  return roundedCuboid({
    size: [size, size, size],
    roundRadius: filletRadius,
    segments
  })
}
";

pub struct PreviewSession {
    script: String,
    slot: MeshSlot,
}

impl PreviewSession {
    /// A fresh session holding the default example script and no mesh.
    pub fn new() -> Self {
        Self {
            script: DEFAULT_SCRIPT.to_string(),
            slot: MeshSlot::new(),
        }
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    /// Replace the script buffer wholesale.
    pub fn set_script(&mut self, source: impl Into<String>) {
        self.script = source.into();
    }

    /// Load the buffer from a file. On failure the existing buffer is
    /// kept; the caller decides how to surface the message.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let source = io::load_script_file(path)?;
        self.script = source;
        Ok(())
    }

    /// Run the full pipeline on the current buffer and display the
    /// result. The prior mesh is only released once the new one is
    /// fully built, so a failed render leaves the display unchanged.
    pub fn render(&mut self) -> Result<&MeshBuffer> {
        let mesh = crate::render(&self.script)?;
        Ok(self.slot.install(mesh))
    }

    /// The currently displayed mesh, if any render has succeeded.
    pub fn mesh(&self) -> Option<&MeshBuffer> {
        self.slot.current()
    }

    /// Export the current buffer as ASCII STL. This re-runs the whole
    /// pipeline rather than reusing the last render, so the export
    /// always reflects the buffer as it stands now.
    pub fn export_stl(&self, name: &str) -> Result<String> {
        crate::export_stl(&self.script, name)
    }
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::new()
    }
}
