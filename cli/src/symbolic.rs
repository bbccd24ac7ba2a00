//! Symbolic differentiation and simplification over an expression union.
//!
//! Every node kind is its own payload type, so each operation is one
//! tagged-union match with a clause per kind.

use casematch::prelude::*;
use std::fmt;
use std::rc::Rc;

pub type ExprRef = Rc<Expr>;

#[derive(Debug, Clone, PartialEq)]
pub struct Var(pub String);
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Const(pub f64);
#[derive(Debug, Clone, PartialEq)]
pub struct Add(pub ExprRef, pub ExprRef);
#[derive(Debug, Clone, PartialEq)]
pub struct Sub(pub ExprRef, pub ExprRef);
#[derive(Debug, Clone, PartialEq)]
pub struct Mul(pub ExprRef, pub ExprRef);
#[derive(Debug, Clone, PartialEq)]
pub struct Div(pub ExprRef, pub ExprRef);
#[derive(Debug, Clone, PartialEq)]
pub struct Pow(pub ExprRef, pub f64);
#[derive(Debug, Clone, PartialEq)]
pub struct Sin(pub ExprRef);
#[derive(Debug, Clone, PartialEq)]
pub struct Cos(pub ExprRef);
#[derive(Debug, Clone, PartialEq)]
pub struct Exp(pub ExprRef);

/// Expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Var(Var),
    Const(Const),
    Add(Add),
    Sub(Sub),
    Mul(Mul),
    Div(Div),
    Pow(Pow),
    Sin(Sin),
    Cos(Cos),
    Exp(Exp),
}

casematch::alternatives! {
    Expr {
        Var => Var,
        Const => Const,
        Add => Add,
        Sub => Sub,
        Mul => Mul,
        Div => Div,
        Pow => Pow,
        Sin => Sin,
        Cos => Cos,
        Exp => Exp,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constructors
// ═══════════════════════════════════════════════════════════════════════════════

pub fn var(name: &str) -> ExprRef {
    Rc::new(Expr::Var(Var(name.to_string())))
}

pub fn cnst(value: f64) -> ExprRef {
    Rc::new(Expr::Const(Const(value)))
}

pub fn add(l: ExprRef, r: ExprRef) -> ExprRef {
    Rc::new(Expr::Add(Add(l, r)))
}

pub fn sub(l: ExprRef, r: ExprRef) -> ExprRef {
    Rc::new(Expr::Sub(Sub(l, r)))
}

pub fn mul(l: ExprRef, r: ExprRef) -> ExprRef {
    Rc::new(Expr::Mul(Mul(l, r)))
}

pub fn div(l: ExprRef, r: ExprRef) -> ExprRef {
    Rc::new(Expr::Div(Div(l, r)))
}

pub fn pow(base: ExprRef, exp: f64) -> ExprRef {
    Rc::new(Expr::Pow(Pow(base, exp)))
}

pub fn sin(arg: ExprRef) -> ExprRef {
    Rc::new(Expr::Sin(Sin(arg)))
}

pub fn cos(arg: ExprRef) -> ExprRef {
    Rc::new(Expr::Cos(Cos(arg)))
}

pub fn exp(arg: ExprRef) -> ExprRef {
    Rc::new(Expr::Exp(Exp(arg)))
}

/// The two demonstration expressions and their labels.
#[must_use]
pub fn demos() -> Vec<(&'static str, ExprRef)> {
    let x = var("x");
    vec![
        (
            "Original function",
            add(mul(sin(pow(x.clone(), 2.0)), cos(x.clone())), exp(x.clone())),
        ),
        (
            "More complex test",
            cos(exp(cos(mul(cnst(2.0), add(cnst(1.0), pow(x, 3.0)))))),
        ),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════════
// Differentiation
// ═══════════════════════════════════════════════════════════════════════════════

/// `d e / d v`, simplified.
pub fn derivative(e: &Expr, v: &str) -> ExprRef {
    let d = |e: &ExprRef| derivative(e, v);

    let raw = match_variant(e)
        .with(type_tag::<Var>(), |x| cnst(if x.0 == v { 1.0 } else { 0.0 }))
        .with(type_tag::<Const>(), |_| cnst(0.0))
        .with(type_tag::<Add>(), |Add(f, g)| add(d(f), d(g)))
        .with(type_tag::<Sub>(), |Sub(f, g)| sub(d(f), d(g)))
        // (f * g)' = f' * g + f * g'
        .with(type_tag::<Mul>(), |Mul(f, g)| {
            add(mul(d(f), g.clone()), mul(f.clone(), d(g)))
        })
        // (f / g)' = (f' * g - f * g') / g^2
        .with(type_tag::<Div>(), |Div(f, g)| {
            div(
                sub(mul(d(f), g.clone()), mul(f.clone(), d(g))),
                pow(g.clone(), 2.0),
            )
        })
        // (f^n)' = n * f' * f^(n-1)
        .with(type_tag::<Pow>(), |Pow(f, n)| {
            mul(cnst(*n), mul(d(f), pow(f.clone(), n - 1.0)))
        })
        .with(type_tag::<Sin>(), |Sin(f)| mul(cos(f.clone()), d(f)))
        .with(type_tag::<Cos>(), |Cos(f)| {
            mul(mul(cnst(-1.0), sin(f.clone())), d(f))
        })
        .with(type_tag::<Exp>(), |Exp(f)| mul(exp(f.clone()), d(f)))
        .materialize::<ExprRef>();

    match raw {
        Ok(raw) => simplify(&raw),
        // Every kind has a clause above
        Err(_) => cnst(0.0),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Simplification
// ═══════════════════════════════════════════════════════════════════════════════

/// The value of a constant node.
fn constant(e: &Expr) -> Option<f64> {
    match_variant(e)
        .with(type_tag::<Const>(), |c| Some(c.0))
        .otherwise(|_| None::<f64>)
        .materialize::<Option<f64>>()
        .ok()
        .flatten()
}

/// Fold constants and drop identity operands.
pub fn simplify(e: &Expr) -> ExprRef {
    let simplified = match_variant(e)
        .with(type_tag::<Add>(), |Add(l, r)| simplify_add(simplify(l), simplify(r)))
        .with(type_tag::<Sub>(), |Sub(l, r)| simplify_sub(simplify(l), simplify(r)))
        .with(type_tag::<Mul>(), |Mul(l, r)| simplify_mul(simplify(l), simplify(r)))
        .with(type_tag::<Div>(), |Div(l, r)| simplify_div(simplify(l), simplify(r)))
        .with(type_tag::<Pow>(), |Pow(b, n)| simplify_pow(simplify(b), *n))
        .with(type_tag::<Sin>(), |Sin(a)| fold(simplify(a), f64::sin, sin))
        .with(type_tag::<Cos>(), |Cos(a)| fold(simplify(a), f64::cos, cos))
        .with(type_tag::<Exp>(), |Exp(a)| fold(simplify(a), f64::exp, exp))
        // Var and Const are already simple
        .otherwise(|e| Rc::new(Expr::clone(e)))
        .materialize::<ExprRef>();
    simplified.unwrap_or_else(|_| Rc::new(e.clone()))
}

fn simplify_add(l: ExprRef, r: ExprRef) -> ExprRef {
    match_all((constant(&l), constant(&r)))
        .with(fields((Field::Is(Some(0.0)), Field::Any)), |_, _| r.clone())
        .with(fields((Field::Any, Field::Is(Some(0.0)))), |_, _| l.clone())
        .with(wildcard(), |a, b| match (a, b) {
            (Some(a), Some(b)) => cnst(a + b),
            _ => add(l.clone(), r.clone()),
        })
        .materialize::<ExprRef>()
        .unwrap_or_else(|_| add(l.clone(), r.clone()))
}

fn simplify_sub(l: ExprRef, r: ExprRef) -> ExprRef {
    match_all((constant(&l), constant(&r)))
        .with(fields((Field::Any, Field::Is(Some(0.0)))), |_, _| l.clone())
        .with(fields((Field::Is(Some(0.0)), Field::Any)), |_, _| {
            simplify_mul(cnst(-1.0), r.clone())
        })
        .with(wildcard(), |a, b| match (a, b) {
            (Some(a), Some(b)) => cnst(a - b),
            _ if l == r => cnst(0.0),
            _ => sub(l.clone(), r.clone()),
        })
        .materialize::<ExprRef>()
        .unwrap_or_else(|_| sub(l.clone(), r.clone()))
}

fn simplify_mul(l: ExprRef, r: ExprRef) -> ExprRef {
    match_all((constant(&l), constant(&r)))
        .with(fields((Field::Is(Some(0.0)), Field::Any)), |_, _| cnst(0.0))
        .with(fields((Field::Any, Field::Is(Some(0.0)))), |_, _| cnst(0.0))
        .with(fields((Field::Is(Some(1.0)), Field::Any)), |_, _| r.clone())
        .with(fields((Field::Any, Field::Is(Some(1.0)))), |_, _| l.clone())
        .with(wildcard(), |a, b| match (a, b) {
            (Some(a), Some(b)) => cnst(a * b),
            _ => mul(l.clone(), r.clone()),
        })
        .materialize::<ExprRef>()
        .unwrap_or_else(|_| mul(l.clone(), r.clone()))
}

fn simplify_div(l: ExprRef, r: ExprRef) -> ExprRef {
    match_all((constant(&l), constant(&r)))
        // 0 / 0 stays as written
        .with(fields((Field::Any, Field::Is(Some(0.0)))), |_, _| {
            div(l.clone(), r.clone())
        })
        .with(fields((Field::Is(Some(0.0)), Field::Any)), |_, _| cnst(0.0))
        .with(fields((Field::Any, Field::Is(Some(1.0)))), |_, _| l.clone())
        .with(wildcard(), |a, b| match (a, b) {
            (Some(a), Some(b)) => cnst(a / b),
            _ => div(l.clone(), r.clone()),
        })
        .materialize::<ExprRef>()
        .unwrap_or_else(|_| div(l.clone(), r.clone()))
}

fn simplify_pow(base: ExprRef, n: f64) -> ExprRef {
    match_all((constant(&base), n))
        .with(fields((Field::Any, Field::Is(0.0))), |_, _| cnst(1.0))
        .with(fields((Field::Any, Field::Is(1.0))), |_, _| base.clone())
        .with(wildcard(), |b, n| match b {
            Some(b) => cnst(b.powf(*n)),
            None => pow(base.clone(), *n),
        })
        .materialize::<ExprRef>()
        .unwrap_or_else(|_| pow(base.clone(), n))
}

fn fold(arg: ExprRef, eval: fn(f64) -> f64, rebuild: fn(ExprRef) -> ExprRef) -> ExprRef {
    match constant(&arg) {
        Some(value) => cnst(eval(value)),
        None => rebuild(arg),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

const PREC_ATOM: u8 = 100;
const PREC_FUNC: u8 = 90;
const PREC_POW: u8 = 80;
const PREC_MUL: u8 = 70;
const PREC_ADD: u8 = 60;

fn precedence(e: &Expr) -> u8 {
    match_variant(e)
        .with(type_tag::<Add>(), |_| PREC_ADD)
        .with(type_tag::<Sub>(), |_| PREC_ADD)
        .with(type_tag::<Mul>(), |_| PREC_MUL)
        .with(type_tag::<Div>(), |_| PREC_MUL)
        .with(type_tag::<Pow>(), |_| PREC_POW)
        .with(type_tag::<Sin>(), |_| PREC_FUNC)
        .with(type_tag::<Cos>(), |_| PREC_FUNC)
        .with(type_tag::<Exp>(), |_| PREC_FUNC)
        .otherwise(|_| PREC_ATOM)
        .materialize::<u8>()
        .unwrap_or(PREC_ATOM)
}

/// Render an operand, parenthesized when it binds looser than its parent.
///
/// Right operands of `-` and `/` are also parenthesized at equal precedence.
fn operand(e: &Expr, parent: u8, strict: bool) -> String {
    let prec = precedence(e);
    if prec < parent || (strict && prec == parent) {
        format!("({e})")
    } else {
        e.to_string()
    }
}

fn binary(l: &Expr, symbol: &str, r: &Expr, prec: u8, strict: bool) -> String {
    format!("{} {symbol} {}", operand(l, prec, false), operand(r, prec, strict))
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match_variant(self)
            .with(type_tag::<Var>(), |v| v.0.clone())
            .with(type_tag::<Const>(), |c| c.0.to_string())
            .with(type_tag::<Add>(), |Add(l, r)| binary(l, "+", r, PREC_ADD, false))
            .with(type_tag::<Sub>(), |Sub(l, r)| binary(l, "-", r, PREC_ADD, true))
            .with(type_tag::<Mul>(), |Mul(l, r)| binary(l, "*", r, PREC_MUL, false))
            .with(type_tag::<Div>(), |Div(l, r)| binary(l, "/", r, PREC_MUL, true))
            .with(type_tag::<Pow>(), |Pow(b, n)| {
                format!("{}^{n}", operand(b, PREC_POW, true))
            })
            .with(type_tag::<Sin>(), |Sin(a)| format!("sin({a})"))
            .with(type_tag::<Cos>(), |Cos(a)| format!("cos({a})"))
            .with(type_tag::<Exp>(), |Exp(a)| format!("exp({a})"))
            .materialize::<String>()
            .map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
