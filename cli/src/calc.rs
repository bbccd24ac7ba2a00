//! Integer arithmetic over a tagged union of operations.

use casematch::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Add {
    pub left: i64,
    pub right: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sub {
    pub left: i64,
    pub right: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mul {
    pub left: i64,
    pub right: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Div {
    pub left: i64,
    pub right: i64,
}

/// One arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add(Add),
    Sub(Sub),
    Mul(Mul),
    Div(Div),
}

casematch::alternatives! {
    Op {
        Add => Add,
        Sub => Sub,
        Mul => Mul,
        Div => Div,
    }
}

/// Build an operation from its command-line name.
pub fn parse(name: &str, left: i64, right: i64) -> Result<Op, String> {
    match_on(name.to_ascii_lowercase())
        .with(one_of(["add".to_string(), "+".to_string()]), |_| {
            Some(Op::Add(Add { left, right }))
        })
        .with(one_of(["sub".to_string(), "-".to_string()]), |_| {
            Some(Op::Sub(Sub { left, right }))
        })
        .with(one_of(["mul".to_string(), "*".to_string(), "x".to_string()]), |_| {
            Some(Op::Mul(Mul { left, right }))
        })
        .with(one_of(["div".to_string(), "/".to_string()]), |_| {
            Some(Op::Div(Div { left, right }))
        })
        .with(wildcard(), |_| None::<Op>)
        .materialize::<Option<Op>>()
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("unknown operation \"{name}\", expected add, sub, mul or div"))
}

/// Evaluate with overflow and division-by-zero checks.
pub fn eval(op: Op) -> Result<i64, String> {
    let overflow = |symbol: &str, left: i64, right: i64| format!("{left} {symbol} {right} overflows");

    match_variant(op)
        .try_with(type_tag::<Add>(), |a| {
            a.left.checked_add(a.right).ok_or_else(|| overflow("+", a.left, a.right))
        })?
        .try_with(type_tag::<Sub>(), |s| {
            s.left.checked_sub(s.right).ok_or_else(|| overflow("-", s.left, s.right))
        })?
        .try_with(type_tag::<Mul>(), |m| {
            m.left.checked_mul(m.right).ok_or_else(|| overflow("*", m.left, m.right))
        })?
        .try_with(type_tag::<Div>(), |d| match d.right {
            0 => Err(format!("{} / 0: division by zero", d.left)),
            _ => d.left.checked_div(d.right).ok_or_else(|| overflow("/", d.left, d.right)),
        })?
        .materialize::<i64>()
        .map_err(|e| e.to_string())
}

/// Render as `left <op> right`.
pub fn render(op: Op) -> String {
    let m = match_variant(op)
        | (type_tag::<Add>() >> |a: &Add| format!("{} + {}", a.left, a.right))
        | (type_tag::<Sub>() >> |s: &Sub| format!("{} - {}", s.left, s.right))
        | (type_tag::<Mul>() >> |m: &Mul| format!("{} * {}", m.left, m.right))
        | (type_tag::<Div>() >> |d: &Div| format!("{} / {}", d.left, d.right));
    // One clause per alternative: always resolved
    m.materialize::<String>().unwrap_or_default()
}
