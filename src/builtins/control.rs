//! Control-flow and definition builtins: if, def, =, \ (lambda)
//!
//! These are ordinary builtins dispatched through the same s-expression
//! path as any other function call; the evaluator has no special forms
//! (SPEC_FULL.md §4.6).

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::value::{Function, Value};
use std::rc::Rc;

fn as_qexpr<'a>(v: &'a Value, function: &str, position: usize) -> Result<&'a [Value], EvalError> {
    match v {
        Value::QExpr(items) => Ok(items),
        other => Err(EvalError::type_error(function, "Q-Expression", other.type_name(), position)),
    }
}

fn sym_name<'a>(v: &'a Value, function: &str, position: usize) -> Result<&'a str, EvalError> {
    match v {
        Value::Sym(s) => Ok(s),
        other => Err(EvalError::type_error(function, "Symbol", other.type_name(), position)),
    }
}

pub fn builtin_if(env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 3 {
        return Err(EvalError::arity_error("if", "3", args.len()));
    }
    let cond = match &args[0] {
        Value::IntNum(n) => *n != 0,
        Value::FloatNum(d) => *d != 0.0,
        other => return Err(EvalError::type_error("if", "Number", other.type_name(), 0)),
    };
    let branch = if cond {
        as_qexpr(&args[1], "if", 1)?
    } else {
        as_qexpr(&args[2], "if", 2)?
    };
    Ok(eval(env, Value::SExpr(branch.to_vec())))
}

fn define(env: &Rc<Environment>, function: &str, args: &[Value], global: bool) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error(function, "at least 1", 0));
    }
    let names = as_qexpr(&args[0], function, 0)?;
    for n in names {
        sym_name(n, function, 0)?;
    }
    let values = &args[1..];
    if names.len() != values.len() {
        return Err(EvalError::arity_error(function, names.len().to_string(), values.len()));
    }
    for (name, value) in names.iter().zip(values.iter()) {
        let name = sym_name(name, function, 0)?;
        if global {
            env.def(name, value.clone());
        } else {
            env.put(name, value.clone());
        }
    }
    Ok(Value::SExpr(Vec::new()))
}

pub fn builtin_def(env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    define(env, "def", args, true)
}

pub fn builtin_put(env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    define(env, "=", args, false)
}

/// Constructs a lambda value, splitting off a trailing `& rest` formal
/// (spec.md §3 invariant) so the applier (`apply.rs`) never has to re-scan
/// for the sentinel at call time.
pub fn builtin_lambda(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("\\", "2", args.len()));
    }
    let formal_names = as_qexpr(&args[0], "\\", 0)?;
    let mut names = Vec::with_capacity(formal_names.len());
    for n in formal_names {
        names.push(sym_name(n, "\\", 0)?.to_string());
    }

    let mut formals = Vec::new();
    let mut rest = None;
    let mut iter = names.into_iter();
    while let Some(name) = iter.next() {
        if name == "&" {
            let rest_name = iter.next().ok_or(EvalError::BadRestFormal)?;
            if iter.next().is_some() {
                return Err(EvalError::BadRestFormal);
            }
            rest = Some(rest_name);
            break;
        }
        formals.push(name);
    }

    as_qexpr(&args[1], "\\", 1)?;
    Ok(Value::Fun(Function::Lambda {
        env: Environment::new(),
        formals,
        rest,
        body: Box::new(args[1].clone()),
    }))
}

pub fn register(env: &Rc<Environment>) {
    env.put("if", Value::Fun(Function::Builtin(builtin_if)));
    env.put("def", Value::Fun(Function::Builtin(builtin_def)));
    env.put("=", Value::Fun(Function::Builtin(builtin_put)));
    env.put("\\", Value::Fun(Function::Builtin(builtin_lambda)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lambda_splits_rest_formal() {
        let env = Environment::new();
        let formals = Value::QExpr(vec![Value::Sym("x".to_string()), Value::Sym("&".to_string()), Value::Sym("xs".to_string())]);
        let body = Value::QExpr(vec![Value::Sym("xs".to_string())]);
        let result = builtin_lambda(&env, &[formals, body]).unwrap();
        match result {
            Value::Fun(Function::Lambda { formals, rest, .. }) => {
                assert_eq!(formals, vec!["x".to_string()]);
                assert_eq!(rest, Some("xs".to_string()));
            }
            other => panic!("expected Lambda, got {other}"),
        }
    }

    #[test]
    fn bad_rest_formal_is_rejected() {
        let env = Environment::new();
        let formals = Value::QExpr(vec![Value::Sym("&".to_string()), Value::Sym("a".to_string()), Value::Sym("b".to_string())]);
        let body = Value::QExpr(vec![]);
        let result = builtin_lambda(&env, &[formals, body]);
        assert!(matches!(result, Err(EvalError::BadRestFormal)));
    }

    #[test]
    fn def_installs_into_root() {
        let root = Environment::new();
        let child = Environment::with_parent(root.clone());
        let names = Value::QExpr(vec![Value::Sym("x".to_string())]);
        builtin_def(&child, &[names, Value::IntNum(10)]).unwrap();
        assert!(matches!(root.get("x"), Ok(Value::IntNum(10))));
    }

    #[test]
    fn put_installs_locally() {
        let root = Environment::new();
        let child = Environment::with_parent(root.clone());
        let names = Value::QExpr(vec![Value::Sym("x".to_string())]);
        builtin_put(&child, &[names, Value::IntNum(10)]).unwrap();
        assert!(matches!(child.get("x"), Ok(Value::IntNum(10))));
        assert!(matches!(root.get("x"), Err(EvalError::UnboundSymbol(_))));
    }
}
