// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Parascope Team

//! Script evaluator
//!
//! Walks a parsed [`Program`], binds top-level declarations into a fresh
//! global scope, then invokes the `main` entry point. The only external
//! names visible to a script are the sandbox binding set; everything
//! else fails name resolution.

use super::ast::{BinaryOp, Expr, Program, Stmt, UnaryOp};
use super::bindings::{Bindings, Builtin};
use super::value::{FunctionValue, Value};
use crate::error::{Error, Result};
use crate::geometry::{primitives, transforms, Solid};
use nalgebra::{Matrix4, Vector3};
use std::collections::BTreeMap;

type Scope = BTreeMap<String, Value>;

enum Flow {
    Normal,
    Return(Value),
}

pub struct Evaluator {
    bindings: Bindings,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            bindings: Bindings::new(),
        }
    }

    /// Run a program and return whatever its `main` produces.
    pub fn run(&self, program: &Program) -> Result<Value> {
        let mut globals = Scope::new();

        for stmt in &program.statements {
            match stmt {
                Stmt::Import => {}
                Stmt::Decl { name, value, .. } => {
                    let value = self.eval_expr(value, None, &globals)?;
                    globals.insert(name.clone(), value);
                }
                Stmt::Function {
                    name, params, body, ..
                } => {
                    globals.insert(
                        name.clone(),
                        Value::Function(FunctionValue {
                            params: params.clone(),
                            body: body.clone(),
                        }),
                    );
                }
                Stmt::Return(_) => {
                    return Err(Error::Evaluation("return outside of a function".into()))
                }
                Stmt::Expr(expr) => {
                    self.eval_expr(expr, None, &globals)?;
                }
            }
        }

        match globals.get("main") {
            Some(Value::Function(main)) => {
                let main = main.clone();
                self.call_function(&main, Vec::new(), &globals)
            }
            _ => Err(Error::NoEntryPoint),
        }
    }

    fn call_function(
        &self,
        function: &FunctionValue,
        args: Vec<Value>,
        globals: &Scope,
    ) -> Result<Value> {
        let mut locals = Scope::new();
        let mut args = args.into_iter();
        for param in &function.params {
            locals.insert(param.clone(), args.next().unwrap_or(Value::Null));
        }
        match self.exec_body(&function.body, &mut locals, globals)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
        }
    }

    fn exec_body(&self, body: &[Stmt], locals: &mut Scope, globals: &Scope) -> Result<Flow> {
        for stmt in body {
            match stmt {
                Stmt::Import => {}
                Stmt::Decl { name, value, .. } => {
                    let value = self.eval_expr(value, Some(locals), globals)?;
                    locals.insert(name.clone(), value);
                }
                Stmt::Function {
                    name, params, body, ..
                } => {
                    locals.insert(
                        name.clone(),
                        Value::Function(FunctionValue {
                            params: params.clone(),
                            body: body.clone(),
                        }),
                    );
                }
                Stmt::Return(expr) => {
                    let value = match expr {
                        Some(expr) => self.eval_expr(expr, Some(locals), globals)?,
                        None => Value::Null,
                    };
                    return Ok(Flow::Return(value));
                }
                Stmt::Expr(expr) => {
                    self.eval_expr(expr, Some(locals), globals)?;
                }
            }
        }
        Ok(Flow::Normal)
    }

    fn lookup(&self, name: &str, locals: Option<&Scope>, globals: &Scope) -> Result<Value> {
        if let Some(value) = locals.and_then(|scope| scope.get(name)) {
            return Ok(value.clone());
        }
        if let Some(value) = globals.get(name) {
            return Ok(value.clone());
        }
        if let Some(value) = self.bindings.lookup(name) {
            return Ok(value.clone());
        }
        Err(Error::Evaluation(format!("{name} is not defined")))
    }

    fn eval_expr(&self, expr: &Expr, locals: Option<&Scope>, globals: &Scope) -> Result<Value> {
        match expr {
            Expr::Number(n) => Ok(Value::Number(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Ident(name) => self.lookup(name, locals, globals),
            Expr::Array(items) => {
                let values = items
                    .iter()
                    .map(|item| self.eval_expr(item, locals, globals))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::List(values))
            }
            Expr::Object(props) => {
                let mut map = BTreeMap::new();
                for (key, value) in props {
                    map.insert(key.clone(), self.eval_expr(value, locals, globals)?);
                }
                Ok(Value::Object(map))
            }
            Expr::Arrow { params, body } => Ok(Value::Function(FunctionValue {
                params: params.clone(),
                body: body.clone(),
            })),
            Expr::Unary { op, operand } => {
                let value = self.eval_expr(operand, locals, globals)?;
                match (op, value) {
                    (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
                    (UnaryOp::Neg, other) => Err(Error::Evaluation(format!(
                        "unary minus applied to {}",
                        other.type_name()
                    ))),
                }
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.eval_expr(lhs, locals, globals)?;
                let rhs = self.eval_expr(rhs, locals, globals)?;
                let (Value::Number(a), Value::Number(b)) = (&lhs, &rhs) else {
                    return Err(Error::Evaluation(format!(
                        "arithmetic on {} and {}",
                        lhs.type_name(),
                        rhs.type_name()
                    )));
                };
                let result = match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    BinaryOp::Rem => a % b,
                };
                Ok(Value::Number(result))
            }
            Expr::Member { object, field } => {
                let object = self.eval_expr(object, locals, globals)?;
                match object {
                    Value::Namespace(ns) => ns.member(field).map(Value::Builtin).ok_or_else(|| {
                        Error::Evaluation(format!("{}.{field} is not defined", ns.name()))
                    }),
                    Value::Object(map) => Ok(map.get(field).cloned().unwrap_or(Value::Null)),
                    other => Err(Error::Evaluation(format!(
                        "cannot read property {field} of {}",
                        other.type_name()
                    ))),
                }
            }
            Expr::Index { object, index } => {
                let object = self.eval_expr(object, locals, globals)?;
                let index = self.eval_expr(index, locals, globals)?;
                match (object, index) {
                    (Value::List(items), Value::Number(i)) => {
                        let i = i as usize;
                        Ok(items.get(i).cloned().unwrap_or(Value::Null))
                    }
                    (Value::Object(map), Value::Str(key)) => {
                        Ok(map.get(&key).cloned().unwrap_or(Value::Null))
                    }
                    (object, index) => Err(Error::Evaluation(format!(
                        "cannot index {} with {}",
                        object.type_name(),
                        index.type_name()
                    ))),
                }
            }
            Expr::Call { callee, args } => {
                let callee = self.eval_expr(callee, locals, globals)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg, locals, globals))
                    .collect::<Result<Vec<_>>>()?;
                match callee {
                    Value::Builtin(builtin) => call_builtin(builtin, args),
                    Value::Function(function) => self.call_function(&function, args, globals),
                    other => Err(Error::Evaluation(format!(
                        "{} is not a function",
                        other.type_name()
                    ))),
                }
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

// --- Builtin dispatch ---

fn call_builtin(builtin: Builtin, args: Vec<Value>) -> Result<Value> {
    let what = builtin.name();
    match builtin {
        Builtin::RoundedCuboid => {
            let opts = options(&args, what)?;
            let size = opt_vec3(opts, "size", what, Vector3::new(2.0, 2.0, 2.0))?;
            let round_radius = opt_number(opts, "roundRadius", what, 0.2)?;
            let segments = opt_segments(opts, what)?;
            let solid = primitives::rounded_cuboid(size, round_radius, segments);
            Ok(Value::Solid(recenter(solid, opts, what)?))
        }
        Builtin::Cuboid => {
            let opts = options(&args, what)?;
            let size = opt_vec3(opts, "size", what, Vector3::new(2.0, 2.0, 2.0))?;
            Ok(Value::Solid(recenter(primitives::cuboid(size), opts, what)?))
        }
        Builtin::Sphere => {
            let opts = options(&args, what)?;
            let radius = opt_number(opts, "radius", what, 1.0)?;
            let segments = opt_segments(opts, what)?;
            Ok(Value::Solid(recenter(
                primitives::sphere(radius, segments),
                opts,
                what,
            )?))
        }
        Builtin::Cylinder => {
            let opts = options(&args, what)?;
            let radius = opt_number(opts, "radius", what, 1.0)?;
            let height = opt_number(opts, "height", what, 2.0)?;
            let segments = opt_segments(opts, what)?;
            Ok(Value::Solid(recenter(
                primitives::cylinder(radius, height, segments),
                opts,
                what,
            )?))
        }
        Builtin::Union => {
            let solids = solid_args(&args, what)?;
            reduce(solids, what, |a, b| a.union(b))
        }
        Builtin::Subtract => {
            let solids = solid_args(&args, what)?;
            reduce(solids, what, |a, b| a.subtract(b))
        }
        Builtin::Intersect => {
            let solids = solid_args(&args, what)?;
            reduce(solids, what, |a, b| a.intersect(b))
        }
        Builtin::Translate => apply_transform(&args, what, transforms::translation),
        Builtin::Rotate => apply_transform(&args, what, transforms::rotation),
        Builtin::Scale => apply_transform(&args, what, transforms::scaling),
        Builtin::ConsoleLog => {
            let line = args
                .iter()
                .map(|arg| arg.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            eprintln!("{line}");
            Ok(Value::Null)
        }
    }
}

fn options<'a>(args: &'a [Value], what: &str) -> Result<Option<&'a BTreeMap<String, Value>>> {
    match args.first() {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(Error::Evaluation(format!(
            "{what}: expected an options object, got {}",
            other.type_name()
        ))),
    }
}

fn opt_number(
    opts: Option<&BTreeMap<String, Value>>,
    key: &str,
    what: &str,
    default: f64,
) -> Result<f64> {
    match opts.and_then(|map| map.get(key)) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(Error::Evaluation(format!(
            "{what}: {key} must be a number, got {}",
            other.type_name()
        ))),
    }
}

fn opt_segments(opts: Option<&BTreeMap<String, Value>>, what: &str) -> Result<u32> {
    let n = opt_number(opts, "segments", what, f64::from(primitives::DEFAULT_SEGMENTS))?;
    if n < 3.0 {
        return Err(Error::Evaluation(format!(
            "{what}: segments must be at least 3"
        )));
    }
    Ok(n as u32)
}

fn opt_vec3(
    opts: Option<&BTreeMap<String, Value>>,
    key: &str,
    what: &str,
    default: Vector3<f64>,
) -> Result<Vector3<f64>> {
    match opts.and_then(|map| map.get(key)) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => vec3(value, what, key),
    }
}

fn vec3(value: &Value, what: &str, key: &str) -> Result<Vector3<f64>> {
    match value {
        // A bare number splats across all three axes.
        Value::Number(n) => Ok(Vector3::repeat(*n)),
        Value::List(items) if items.len() == 3 => {
            let mut out = Vector3::zeros();
            for (i, item) in items.iter().enumerate() {
                let Value::Number(n) = item else {
                    return Err(Error::Evaluation(format!(
                        "{what}: {key} must contain numbers, got {}",
                        item.type_name()
                    )));
                };
                out[i] = *n;
            }
            Ok(out)
        }
        other => Err(Error::Evaluation(format!(
            "{what}: {key} must be a vector of 3 numbers, got {}",
            other.type_name()
        ))),
    }
}

/// Primitives accept a `center` point; nonzero centers translate the
/// freshly built solid.
fn recenter(
    solid: Solid,
    opts: Option<&BTreeMap<String, Value>>,
    what: &str,
) -> Result<Solid> {
    let center = opt_vec3(opts, "center", what, Vector3::zeros())?;
    if center == Vector3::zeros() {
        Ok(solid)
    } else {
        Ok(solid.transform(&transforms::translation(center)))
    }
}

/// Collect solid arguments, flattening arrays the way the modeling
/// vocabulary does (`union([a, b])` and `union(a, b)` are equivalent).
fn solid_args(args: &[Value], what: &str) -> Result<Vec<Solid>> {
    fn collect(values: &[Value], what: &str, out: &mut Vec<Solid>) -> Result<()> {
        for value in values {
            match value {
                Value::Solid(solid) => out.push(solid.clone()),
                Value::List(items) => collect(items, what, out)?,
                other => {
                    return Err(Error::Evaluation(format!(
                        "{what}: expected solids, got {}",
                        other.type_name()
                    )))
                }
            }
        }
        Ok(())
    }

    let mut out = Vec::new();
    collect(args, what, &mut out)?;
    Ok(out)
}

fn reduce(solids: Vec<Solid>, what: &str, op: impl Fn(&Solid, &Solid) -> Solid) -> Result<Value> {
    solids
        .into_iter()
        .reduce(|a, b| op(&a, &b))
        .map(Value::Solid)
        .ok_or_else(|| Error::Evaluation(format!("{what}: expected at least one solid")))
}

fn apply_transform(
    args: &[Value],
    what: &str,
    matrix_for: fn(Vector3<f64>) -> Matrix4<f64>,
) -> Result<Value> {
    let vector = match args.first() {
        Some(value) => vec3(value, what, "vector")?,
        None => {
            return Err(Error::Evaluation(format!(
                "{what}: expected a vector followed by solids"
            )))
        }
    };
    let solids = solid_args(&args[1..], what)?;
    if solids.is_empty() {
        return Err(Error::Evaluation(format!(
            "{what}: expected at least one solid"
        )));
    }

    let matrix = matrix_for(vector);
    let mut out: Vec<Value> = solids
        .iter()
        .map(|solid| Value::Solid(solid.transform(&matrix)))
        .collect();
    if out.len() == 1 {
        Ok(out.remove(0))
    } else {
        Ok(Value::List(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parser::parse_script;

    fn run(source: &str) -> Result<Value> {
        Evaluator::new().run(&parse_script(source)?)
    }

    #[test]
    fn entry_point_result_is_returned() {
        let value = run("export const main = () => { return cuboid({ size: [2, 2, 2] }) }").unwrap();
        assert!(matches!(value, Value::Solid(_)));
    }

    #[test]
    fn bare_primitive_names_resolve() {
        let scripts = [
            "export const main = () => cuboid({ size: [2, 2, 2] })",
            "export const main = () => sphere({ radius: 1, segments: 8 })",
            "export const main = () => cylinder({ radius: 1, height: 2, segments: 8 })",
        ];
        for source in scripts {
            assert!(matches!(run(source), Ok(Value::Solid(_))), "{source}");
        }
    }

    #[test]
    fn function_declaration_entry_point() {
        let value = run("function main() { return sphere({ radius: 1, segments: 8 }) }");
        assert!(matches!(value, Ok(Value::Solid(_))));
    }

    #[test]
    fn missing_main_is_no_entry_point() {
        let result = run("const a = 1;");
        assert!(matches!(result, Err(Error::NoEntryPoint)));
    }

    #[test]
    fn non_callable_main_is_no_entry_point() {
        let result = run("const main = 5;");
        assert!(matches!(result, Err(Error::NoEntryPoint)));
    }

    #[test]
    fn unknown_names_fail_resolution() {
        let result = run("export const main = () => { return torus() }");
        match result {
            Err(Error::Evaluation(message)) => assert_eq!(message, "torus is not defined"),
            other => panic!("expected evaluation error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_namespace_members_fail_resolution() {
        let result = run("export const main = () => { return primitives.torus() }");
        match result {
            Err(Error::Evaluation(message)) => {
                assert_eq!(message, "primitives.torus is not defined")
            }
            other => panic!("expected evaluation error, got {other:?}"),
        }
    }

    #[test]
    fn globals_and_helpers_are_visible_to_main() {
        let source = "
            const size = 4
            const box = (s) => cuboid({ size: [s, s, s] })
            export const main = () => {
                return box(size / 2)
            }
        ";
        assert!(matches!(run(source), Ok(Value::Solid(_))));
    }

    #[test]
    fn subtract_with_translated_hole() {
        // difference of a plate and a shifted cylinder, via namespaces
        let source = "
            export const main = () => {
                const plate = cuboid({ size: [10, 10, 2] })
                const hole = transforms.translate([2, 0, 0],
                    primitives.cylinder({ radius: 1, height: 4, segments: 12 }))
                return booleans.subtract(plate, hole)
            }
        ";
        let Ok(Value::Solid(solid)) = run(source) else {
            panic!("expected a solid");
        };
        assert!(!solid.is_empty());
    }

    #[test]
    fn union_accepts_an_array_argument() {
        let source = "
            export const main = () => {
                const parts = [cuboid({ size: [1, 1, 1] }),
                    translate([3, 0, 0], cuboid({ size: [1, 1, 1] }))]
                return union(parts)
            }
        ";
        assert!(matches!(run(source), Ok(Value::Solid(_))));
    }

    #[test]
    fn transforms_keep_single_solids_single() {
        let value = run(
            "export const main = () => translate([1, 0, 0], cuboid({ size: [1, 1, 1] }))",
        )
        .unwrap();
        assert!(matches!(value, Value::Solid(_)));
    }

    #[test]
    fn segment_floor_is_enforced() {
        let result = run("export const main = () => sphere({ radius: 1, segments: 2 })");
        assert!(matches!(result, Err(Error::Evaluation(_))));
    }

    #[test]
    fn main_returning_array_passes_through() {
        let value = run(
            "export const main = () => [cuboid({ size: [1, 1, 1] }), sphere({ segments: 8 })]",
        )
        .unwrap();
        match value {
            Value::List(items) => assert_eq!(items.len(), 2),
            other => panic!("expected a list, got {other:?}"),
        }
    }
}
