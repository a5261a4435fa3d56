//! Ordering and equality operators: <, <=, >, >=, ==, !=

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Function, Value};
use std::rc::Rc;

fn as_f64(v: &Value, function: &str, position: usize) -> Result<f64, EvalError> {
    match v {
        Value::IntNum(n) => Ok(*n as f64),
        Value::FloatNum(d) => Ok(*d),
        other => Err(EvalError::type_error(function, "Number", other.type_name(), position)),
    }
}

fn ordering(function: &'static str, args: &[Value], cmp: fn(f64, f64) -> bool) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error(function, "2", args.len()));
    }
    let a = as_f64(&args[0], function, 0)?;
    let b = as_f64(&args[1], function, 1)?;
    Ok(Value::IntNum(if cmp(a, b) { 1 } else { 0 }))
}

pub fn builtin_lt(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    ordering("<", args, |a, b| a < b)
}

pub fn builtin_le(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    ordering("<=", args, |a, b| a <= b)
}

pub fn builtin_gt(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    ordering(">", args, |a, b| a > b)
}

pub fn builtin_ge(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    ordering(">=", args, |a, b| a >= b)
}

/// Structural equality (spec.md §4.8), not limited to numbers.
pub fn builtin_eq(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("==", "2", args.len()));
    }
    Ok(Value::IntNum(if args[0].structurally_eq(&args[1]) { 1 } else { 0 }))
}

pub fn builtin_neq(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("!=", "2", args.len()));
    }
    Ok(Value::IntNum(if args[0].structurally_eq(&args[1]) { 0 } else { 1 }))
}

pub fn register(env: &Rc<Environment>) {
    env.put("<", Value::Fun(Function::Builtin(builtin_lt)));
    env.put("<=", Value::Fun(Function::Builtin(builtin_le)));
    env.put(">", Value::Fun(Function::Builtin(builtin_gt)));
    env.put(">=", Value::Fun(Function::Builtin(builtin_ge)));
    env.put("==", Value::Fun(Function::Builtin(builtin_eq)));
    env.put("!=", Value::Fun(Function::Builtin(builtin_neq)));
}
