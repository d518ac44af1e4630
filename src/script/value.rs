// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Runtime values of the script evaluator

use super::ast::Stmt;
use super::bindings::{Builtin, Namespace};
use crate::geometry::Solid;
use std::collections::BTreeMap;
use std::fmt;

/// Tagged union of everything a script expression can produce. The
/// normalizer's three result shapes (solid, list of solids, wrapper
/// object) are a match over this type.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Number(f64),
    Bool(bool),
    Str(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
    Solid(Solid),
    Function(FunctionValue),
    Builtin(Builtin),
    Namespace(Namespace),
}

/// A user-defined function: parameter names plus body statements.
/// Bodies see the global scope and their own parameters only.
#[derive(Debug, Clone)]
pub struct FunctionValue {
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::List(_) => "array",
            Value::Object(_) => "object",
            Value::Solid(_) => "solid",
            Value::Function(_) => "function",
            Value::Builtin(_) => "function",
            Value::Namespace(_) => "namespace",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::Solid(solid) => write!(f, "[solid: {} polygons]", solid.polygons().len()),
            Value::Function(_) => write!(f, "[function]"),
            Value::Builtin(b) => write!(f, "[function: {}]", b.name()),
            Value::Namespace(ns) => write!(f, "[namespace: {}]", ns.name()),
        }
    }
}
