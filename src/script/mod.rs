// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Sandboxed script front end: grammar, AST, parser, and evaluator.

pub mod ast;
pub mod bindings;
pub mod eval;
pub mod parser;
pub mod value;

pub use ast::{Expr, Program, Stmt};
pub use bindings::{Bindings, Builtin, Namespace};
pub use eval::Evaluator;
pub use parser::parse_script;
pub use value::{FunctionValue, Value};
