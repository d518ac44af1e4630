// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Script AST
//!
//! Serde-derived so the CLI can dump parsed programs as JSON.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    /// Import statements parse but bind nothing; the sandbox provides
    /// every name a script may use.
    Import,
    Decl {
        name: String,
        value: Expr,
        exported: bool,
    },
    Function {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        exported: bool,
    },
    Return(Option<Expr>),
    Expr(Expr),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    Number(f64),
    Str(String),
    Bool(bool),
    Ident(String),
    Array(Vec<Expr>),
    /// Object literal; shorthand `{ segments }` is stored as
    /// `("segments", Ident("segments"))`.
    Object(Vec<(String, Expr)>),
    Arrow {
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Member {
        object: Box<Expr>,
        field: String,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}
