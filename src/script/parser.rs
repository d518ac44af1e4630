// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Script parser using pest

use super::ast::{BinaryOp, Expr, Program, Stmt, UnaryOp};
use crate::error::{Error, Result};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "script/script.pest"]
struct ScriptParser;

/// Parse script source into a [`Program`].
pub fn parse_script(source: &str) -> Result<Program> {
    let mut pairs = ScriptParser::parse(Rule::program, source)
        .map_err(|e| Error::Parse(e.to_string()))?;

    let mut statements = Vec::new();
    if let Some(program) = pairs.next() {
        for pair in program.into_inner() {
            if pair.as_rule() == Rule::statement {
                statements.push(parse_statement(pair)?);
            }
        }
    }
    Ok(Program { statements })
}

fn inner1(pair: Pair<Rule>) -> Result<Pair<Rule>> {
    let rule = pair.as_rule();
    pair.into_inner()
        .next()
        .ok_or_else(|| Error::Parse(format!("empty {rule:?}")))
}

/// Keyword tokens show up as pairs; everything structural skips them.
fn is_keyword(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::kw_import
            | Rule::kw_export
            | Rule::kw_const
            | Rule::kw_let
            | Rule::kw_var
            | Rule::kw_function
            | Rule::kw_return
            | Rule::kw_from
            | Rule::kw_as
            | Rule::kw_true
            | Rule::kw_false
    )
}

fn significant(pair: Pair<Rule>) -> impl Iterator<Item = Pair<Rule>> + '_ {
    pair.into_inner().filter(|p| !is_keyword(p.as_rule()))
}

fn parse_statement(pair: Pair<Rule>) -> Result<Stmt> {
    let inner = inner1(pair)?;
    match inner.as_rule() {
        Rule::import_stmt => Ok(Stmt::Import),
        Rule::export_stmt => {
            let decl = significant(inner)
                .next()
                .ok_or_else(|| Error::Parse("empty export statement".into()))?;
            match parse_statement_kind(decl)? {
                Stmt::Decl { name, value, .. } => Ok(Stmt::Decl {
                    name,
                    value,
                    exported: true,
                }),
                Stmt::Function {
                    name, params, body, ..
                } => Ok(Stmt::Function {
                    name,
                    params,
                    body,
                    exported: true,
                }),
                _ => Err(Error::Parse("export must qualify a declaration".into())),
            }
        }
        _ => parse_statement_kind(inner),
    }
}

fn parse_statement_kind(pair: Pair<Rule>) -> Result<Stmt> {
    match pair.as_rule() {
        Rule::decl_stmt => {
            let mut parts = significant(pair);
            let name = parts
                .next()
                .ok_or_else(|| Error::Parse("declaration missing name".into()))?
                .as_str()
                .to_string();
            let value = parts
                .next()
                .ok_or_else(|| Error::Parse("declaration missing initializer".into()))?;
            Ok(Stmt::Decl {
                name,
                value: parse_expr(value)?,
                exported: false,
            })
        }
        Rule::func_decl => {
            let mut parts = significant(pair);
            let name = parts
                .next()
                .ok_or_else(|| Error::Parse("function missing name".into()))?
                .as_str()
                .to_string();
            let mut params = Vec::new();
            let mut body = Vec::new();
            for part in parts {
                match part.as_rule() {
                    Rule::param_list => params = parse_params(part),
                    Rule::block => body = parse_block(part)?,
                    _ => {}
                }
            }
            Ok(Stmt::Function {
                name,
                params,
                body,
                exported: false,
            })
        }
        Rule::return_stmt => {
            let expr = significant(pair).next().map(parse_expr).transpose()?;
            Ok(Stmt::Return(expr))
        }
        Rule::expr_stmt => Ok(Stmt::Expr(parse_expr(inner1(pair)?)?)),
        rule => Err(Error::Parse(format!("unexpected statement {rule:?}"))),
    }
}

fn parse_block(pair: Pair<Rule>) -> Result<Vec<Stmt>> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::statement)
        .map(parse_statement)
        .collect()
}

fn parse_params(pair: Pair<Rule>) -> Vec<String> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::ident)
        .map(|p| p.as_str().to_string())
        .collect()
}

fn parse_expr(pair: Pair<Rule>) -> Result<Expr> {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| Error::Parse("empty expression".into()))?;
    let mut lhs = parse_mul(first)?;
    while let Some(op) = inner.next() {
        let rhs = inner
            .next()
            .ok_or_else(|| Error::Parse("operator missing right-hand side".into()))?;
        let op = match op.as_str() {
            "+" => BinaryOp::Add,
            _ => BinaryOp::Sub,
        };
        lhs = Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(parse_mul(rhs)?),
        };
    }
    Ok(lhs)
}

fn parse_mul(pair: Pair<Rule>) -> Result<Expr> {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| Error::Parse("empty expression".into()))?;
    let mut lhs = parse_unary(first)?;
    while let Some(op) = inner.next() {
        let rhs = inner
            .next()
            .ok_or_else(|| Error::Parse("operator missing right-hand side".into()))?;
        let op = match op.as_str() {
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            _ => BinaryOp::Rem,
        };
        lhs = Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(parse_unary(rhs)?),
        };
    }
    Ok(lhs)
}

fn parse_unary(pair: Pair<Rule>) -> Result<Expr> {
    let mut negated = false;
    let mut operand = None;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::neg => negated = true,
            Rule::postfix_expr => operand = Some(parse_postfix(part)?),
            _ => {}
        }
    }
    let operand = operand.ok_or_else(|| Error::Parse("empty unary expression".into()))?;
    Ok(if negated {
        Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        }
    } else {
        operand
    })
}

fn parse_postfix(pair: Pair<Rule>) -> Result<Expr> {
    let mut inner = pair.into_inner();
    let primary = inner
        .next()
        .ok_or_else(|| Error::Parse("empty expression".into()))?;
    let mut expr = parse_primary(primary)?;
    for postfix in inner {
        let op = inner1(postfix)?;
        expr = match op.as_rule() {
            Rule::member => Expr::Member {
                object: Box::new(expr),
                field: inner1(op)?.as_str().to_string(),
            },
            Rule::call => {
                let args = match op.into_inner().next() {
                    Some(list) => list
                        .into_inner()
                        .map(parse_expr)
                        .collect::<Result<Vec<_>>>()?,
                    None => Vec::new(),
                };
                Expr::Call {
                    callee: Box::new(expr),
                    args,
                }
            }
            Rule::index => Expr::Index {
                object: Box::new(expr),
                index: Box::new(parse_expr(inner1(op)?)?),
            },
            rule => return Err(Error::Parse(format!("unexpected postfix {rule:?}"))),
        };
    }
    Ok(expr)
}

fn parse_primary(pair: Pair<Rule>) -> Result<Expr> {
    let inner = inner1(pair)?;
    match inner.as_rule() {
        Rule::number => inner
            .as_str()
            .parse::<f64>()
            .map(Expr::Number)
            .map_err(|e| Error::Parse(format!("bad number literal: {e}"))),
        Rule::string => Ok(Expr::Str(string_contents(inner)?)),
        Rule::boolean => Ok(Expr::Bool(inner.as_str() == "true")),
        Rule::ident => Ok(Expr::Ident(inner.as_str().to_string())),
        Rule::array_lit => Ok(Expr::Array(
            inner
                .into_inner()
                .map(parse_expr)
                .collect::<Result<Vec<_>>>()?,
        )),
        Rule::object_lit => {
            let mut props = Vec::new();
            for prop in inner.into_inner() {
                props.push(parse_prop(prop)?);
            }
            Ok(Expr::Object(props))
        }
        Rule::arrow_fn => {
            let mut params = Vec::new();
            let mut body = Vec::new();
            for part in inner.into_inner() {
                match part.as_rule() {
                    Rule::param_list => params = parse_params(part),
                    Rule::arrow_body => {
                        let content = inner1(part)?;
                        body = match content.as_rule() {
                            Rule::block => parse_block(content)?,
                            // Expression body is an implicit return.
                            _ => vec![Stmt::Return(Some(parse_expr(content)?))],
                        };
                    }
                    _ => {}
                }
            }
            Ok(Expr::Arrow { params, body })
        }
        Rule::paren_expr => parse_expr(inner1(inner)?),
        rule => Err(Error::Parse(format!("unexpected expression {rule:?}"))),
    }
}

fn parse_prop(pair: Pair<Rule>) -> Result<(String, Expr)> {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or_else(|| Error::Parse("empty object property".into()))?;
    match first.as_rule() {
        Rule::prop_key => {
            let key_pair = inner1(first)?;
            let key = match key_pair.as_rule() {
                Rule::string => string_contents(key_pair)?,
                _ => key_pair.as_str().to_string(),
            };
            let value = inner
                .next()
                .ok_or_else(|| Error::Parse("object property missing value".into()))?;
            Ok((key, parse_expr(value)?))
        }
        // Shorthand property: `{ segments }`.
        Rule::ident => {
            let name = first.as_str().to_string();
            Ok((name.clone(), Expr::Ident(name)))
        }
        rule => Err(Error::Parse(format!("unexpected object property {rule:?}"))),
    }
}

fn string_contents(pair: Pair<Rule>) -> Result<String> {
    Ok(inner1(pair)?.as_str().to_string())
}
