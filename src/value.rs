// ABOUTME: Value types representing the Lisp data model and its printed form

use crate::bignum::Bignum;
use crate::env::Environment;
use crate::error::EvalError;
use std::fmt;
use std::rc::Rc;

/// A built-in function: an opaque reference to a host-language function
/// taking the calling environment and an already-evaluated argument list.
pub type BuiltinFn = fn(&Rc<Environment>, &[Value]) -> Result<Value, EvalError>;

/// A user-defined or built-in function value.
#[derive(Clone)]
pub enum Function {
    Builtin(BuiltinFn),
    Lambda {
        env: Rc<Environment>,
        formals: Vec<String>,
        /// The rest-parameter name, if `formals` ended in `& name` at
        /// construction time. Kept separate so the `&` sentinel never has
        /// to be re-scanned for during application (see SPEC_FULL.md §3).
        rest: Option<String>,
        body: Box<Value>,
    },
}

#[derive(Clone)]
pub enum Value {
    Err(String),
    IntNum(i64),
    FloatNum(f64),
    BigNum(Bignum),
    Sym(String),
    Str(String),
    SExpr(Vec<Value>),
    QExpr(Vec<Value>),
    Fun(Function),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Err(_) => "Error",
            Value::IntNum(_) => "Integer Number",
            Value::FloatNum(_) => "Floating-Point Number",
            Value::BigNum(_) => "Bignum",
            Value::Sym(_) => "Symbol",
            Value::Str(_) => "String",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
            Value::Fun(_) => "Function",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::IntNum(_) | Value::FloatNum(_))
    }

    /// Structural equality per spec.md §4.8.
    pub fn structurally_eq(&self, other: &Value) -> bool {
        if self.is_number() && other.is_number() {
            return as_f64(self) == as_f64(other);
        }
        match (self, other) {
            (Value::Err(a), Value::Err(b)) => a == b,
            (Value::Sym(a), Value::Sym(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::BigNum(a), Value::BigNum(b)) => Bignum::compare(a, b) == 0,
            (Value::SExpr(a), Value::SExpr(b)) | (Value::QExpr(a), Value::QExpr(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.structurally_eq(y))
            }
            (Value::Fun(Function::Builtin(a)), Value::Fun(Function::Builtin(b))) => {
                std::ptr::eq(*a as *const (), *b as *const ())
            }
            (
                Value::Fun(Function::Lambda {
                    formals: fa, rest: ra, body: ba, ..
                }),
                Value::Fun(Function::Lambda {
                    formals: fb, rest: rb, body: bb, ..
                }),
            ) => fa == fb && ra == rb && ba.structurally_eq(bb),
            _ => false,
        }
    }
}

fn as_f64(v: &Value) -> f64 {
    match v {
        Value::IntNum(n) => *n as f64,
        Value::FloatNum(d) => *d,
        _ => unreachable!("as_f64 called on non-number"),
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, open: char, close: char, items: &[Value]) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

/// C-style escape of a string for printing, mirroring spec.md §4.9.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::IntNum(n) => write!(f, "{n}"),
            // Fixed 6-decimal precision, matching the original's `printf("%lf", ...)`.
            Value::FloatNum(d) => write!(f, "{d:.6}"),
            Value::BigNum(b) => write!(f, "{b}"),
            Value::Sym(s) => write!(f, "{s}"),
            Value::Str(s) => write!(f, "\"{}\"", escape(s)),
            Value::SExpr(items) => write_children(f, '(', ')', items),
            Value::QExpr(items) => write_children(f, '{', '}', items),
            Value::Fun(Function::Builtin(func)) => write!(f, "<builtin@{:p}>", *func as *const ()),
            Value::Fun(Function::Lambda { formals, rest, body, .. }) => {
                write!(f, "(\\ {{")?;
                for (i, name) in formals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{name}")?;
                }
                if let Some(r) = rest {
                    if !formals.is_empty() {
                        write!(f, " ")?;
                    }
                    write!(f, "& {r}")?;
                }
                write!(f, "}} {body})")
            }
            Value::Err(msg) => write!(f, "Error: {msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_float_display() {
        assert_eq!(Value::IntNum(42).to_string(), "42");
        assert_eq!(Value::FloatNum(6.0).to_string(), "6.000000");
        assert_eq!(Value::FloatNum(-2.5).to_string(), "-2.500000");
    }

    #[test]
    fn sexpr_and_qexpr_display() {
        let s = Value::SExpr(vec![Value::IntNum(1), Value::IntNum(2)]);
        assert_eq!(s.to_string(), "(1 2)");
        let q = Value::QExpr(vec![Value::IntNum(1), Value::IntNum(2)]);
        assert_eq!(q.to_string(), "{1 2}");
    }

    #[test]
    fn string_display_escapes() {
        let v = Value::Str("a\nb".to_string());
        assert_eq!(v.to_string(), "\"a\\nb\"");
    }

    #[test]
    fn err_display() {
        assert_eq!(Value::Err("boom".to_string()).to_string(), "Error: boom");
    }

    #[test]
    fn numeric_structural_equality_crosses_int_and_float() {
        assert!(Value::IntNum(2).structurally_eq(&Value::FloatNum(2.0)));
        assert!(!Value::IntNum(2).structurally_eq(&Value::FloatNum(2.5)));
    }

    #[test]
    fn list_structural_equality() {
        let a = Value::QExpr(vec![Value::IntNum(1), Value::Sym("x".to_string())]);
        let b = Value::QExpr(vec![Value::IntNum(1), Value::Sym("x".to_string())]);
        assert!(a.structurally_eq(&b));
    }
}
