// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! The sandbox binding set
//!
//! The fixed, enumerated set of names a script can reach. This is the
//! entire contract between user scripts and the modeling layer: nothing
//! outside it resolves, so scripts have no route to host state.

use super::value::Value;
use std::collections::BTreeMap;

/// Callable sandbox functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    RoundedCuboid,
    Cuboid,
    Sphere,
    Cylinder,
    Union,
    Subtract,
    Intersect,
    Translate,
    Rotate,
    Scale,
    ConsoleLog,
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::RoundedCuboid => "roundedCuboid",
            Builtin::Cuboid => "cuboid",
            Builtin::Sphere => "sphere",
            Builtin::Cylinder => "cylinder",
            Builtin::Union => "union",
            Builtin::Subtract => "subtract",
            Builtin::Intersect => "intersect",
            Builtin::Translate => "translate",
            Builtin::Rotate => "rotate",
            Builtin::Scale => "scale",
            Builtin::ConsoleLog => "console.log",
        }
    }
}

/// Namespaces exposed to scripts; member lookup is as fixed as the
/// top-level names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Primitives,
    Booleans,
    Transforms,
    Console,
}

impl Namespace {
    pub fn name(self) -> &'static str {
        match self {
            Namespace::Primitives => "primitives",
            Namespace::Booleans => "booleans",
            Namespace::Transforms => "transforms",
            Namespace::Console => "console",
        }
    }

    pub fn member(self, field: &str) -> Option<Builtin> {
        match (self, field) {
            (Namespace::Primitives, "roundedCuboid") => Some(Builtin::RoundedCuboid),
            (Namespace::Primitives, "cuboid") => Some(Builtin::Cuboid),
            (Namespace::Primitives, "sphere") => Some(Builtin::Sphere),
            (Namespace::Primitives, "cylinder") => Some(Builtin::Cylinder),
            (Namespace::Booleans, "union") => Some(Builtin::Union),
            (Namespace::Booleans, "subtract") => Some(Builtin::Subtract),
            (Namespace::Booleans, "intersect") => Some(Builtin::Intersect),
            (Namespace::Transforms, "translate") => Some(Builtin::Translate),
            (Namespace::Transforms, "rotate") => Some(Builtin::Rotate),
            (Namespace::Transforms, "scale") => Some(Builtin::Scale),
            (Namespace::Console, "log") => Some(Builtin::ConsoleLog),
            _ => None,
        }
    }
}

/// Name → value map handed to every evaluation; constructed once and
/// read-only from the script's perspective.
#[derive(Debug)]
pub struct Bindings {
    entries: BTreeMap<&'static str, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("roundedCuboid", Value::Builtin(Builtin::RoundedCuboid));
        entries.insert("cuboid", Value::Builtin(Builtin::Cuboid));
        entries.insert("sphere", Value::Builtin(Builtin::Sphere));
        entries.insert("cylinder", Value::Builtin(Builtin::Cylinder));
        entries.insert("primitives", Value::Namespace(Namespace::Primitives));
        entries.insert("booleans", Value::Namespace(Namespace::Booleans));
        entries.insert("transforms", Value::Namespace(Namespace::Transforms));
        entries.insert("union", Value::Builtin(Builtin::Union));
        entries.insert("translate", Value::Builtin(Builtin::Translate));
        entries.insert("console", Value::Namespace(Namespace::Console));
        Self { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_set_is_exactly_the_contract() {
        let bindings = Bindings::new();
        let names: Vec<_> = bindings.names().collect();
        assert_eq!(
            names,
            vec![
                "booleans",
                "console",
                "cuboid",
                "cylinder",
                "primitives",
                "roundedCuboid",
                "sphere",
                "transforms",
                "translate",
                "union",
            ]
        );
    }

    #[test]
    fn every_primitive_resolves_bare_and_namespaced() {
        let bindings = Bindings::new();
        for name in ["roundedCuboid", "cuboid", "sphere", "cylinder"] {
            assert!(
                matches!(bindings.lookup(name), Some(Value::Builtin(_))),
                "{name} missing from the binding set"
            );
            assert!(Namespace::Primitives.member(name).is_some());
        }
    }

    #[test]
    fn namespaces_resolve_only_known_members() {
        assert_eq!(
            Namespace::Primitives.member("roundedCuboid"),
            Some(Builtin::RoundedCuboid)
        );
        assert_eq!(Namespace::Primitives.member("torus"), None);
        assert_eq!(Namespace::Console.member("warn"), None);
    }
}
