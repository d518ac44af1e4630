// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! The modeling layer behind the sandbox binding set: polygon BREP
//! solids, BSP boolean operations, primitives, and transforms.

mod bsp;
mod plane;
mod polygon;
mod solid;

pub mod primitives;
pub mod transforms;

pub use plane::Plane;
pub use polygon::Polygon;
pub use solid::Solid;
