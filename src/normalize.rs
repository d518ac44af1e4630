// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Result normalization
//!
//! Entry points may return one solid, an array of solids, or a wrapper
//! object carrying a `solids` field. Downstream stages only handle a
//! single solid, so arrays are union-reduced here.

use crate::error::{Error, Result};
use crate::geometry::Solid;
use crate::script::Value;

/// Reduce an evaluation result to exactly one solid.
pub fn normalize(value: Value) -> Result<Solid> {
    match value {
        Value::Solid(solid) => Ok(solid),
        Value::List(items) => {
            let solids: Vec<Solid> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Solid(solid) => Some(solid),
                    _ => None,
                })
                .collect();
            solids
                .into_iter()
                .reduce(|a, b| a.union(&b))
                .ok_or(Error::NoSolidsInArray)
        }
        Value::Object(mut map) => match map.remove("solids") {
            Some(inner @ Value::List(_)) => normalize(inner),
            _ => Err(Error::NotASolid),
        },
        _ => Err(Error::NotASolid),
    }
}
