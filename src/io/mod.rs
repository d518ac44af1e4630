// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Input/output: script loading and STL export.

pub mod export_stl;
pub mod importer;

pub use export_stl::{serialize_ascii, serialize_mesh};
pub use importer::load_script_file;
