// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Pipeline error taxonomy
//!
//! Every stage failure aborts the current render/export attempt entirely;
//! none are retried, and all are recoverable by editing the script.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Non-fatal at the session level: the caller keeps the existing
    /// script buffer and surfaces the message.
    #[error("failed to load script: {0}")]
    ScriptLoad(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no main() export found")]
    NoEntryPoint,

    /// Any failure raised while running user code, message verbatim.
    #[error("{0}")]
    Evaluation(String),

    #[error("expected main() to return a solid (or an array of solids)")]
    NotASolid,

    #[error("main() returned an array, but it did not contain any solids")]
    NoSolidsInArray,

    #[error("solid has no polygons (empty or invalid solid)")]
    EmptySolid,

    #[error("solid has non-finite vertex coordinates")]
    NonFiniteVertex,

    #[error("solid polygons contain no valid vertices")]
    NoValidVertices,

    #[error("triangulation produced no triangles (unsupported polygons)")]
    EmptyTriangulation,

    #[error("STL serialization produced empty/invalid output")]
    InvalidSerialization,
}
