//! Arbitrary-precision integer operators: addb, subb, mulb, divb, to-bnum, cmp-bnum

use crate::bignum::Bignum;
use crate::env::Environment;
use crate::error::EvalError;
use crate::value::{Function, Value};
use std::rc::Rc;

fn as_bignum(v: &Value, function: &str, position: usize) -> Result<Bignum, EvalError> {
    match v {
        Value::BigNum(b) => Ok(*b),
        Value::IntNum(n) => Ok(Bignum::from_i64(*n)),
        other => Err(EvalError::type_error(function, "Integer Number or Bignum", other.type_name(), position)),
    }
}

fn fold_bignum(function: &str, args: &[Value], op: fn(&Bignum, &Bignum) -> Bignum) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error(function, "at least 1", 0));
    }
    let mut acc = as_bignum(&args[0], function, 0)?;
    for (i, arg) in args[1..].iter().enumerate() {
        let b = as_bignum(arg, function, i + 1)?;
        acc = op(&acc, &b);
    }
    Ok(Value::BigNum(acc))
}

pub fn builtin_addb(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    fold_bignum("addb", args, Bignum::add)
}

pub fn builtin_subb(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    fold_bignum("subb", args, Bignum::sub)
}

pub fn builtin_mulb(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    fold_bignum("mulb", args, Bignum::mul)
}

pub fn builtin_divb(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("divb", "at least 1", 0));
    }
    let mut acc = as_bignum(&args[0], "divb", 0)?;
    for (i, arg) in args[1..].iter().enumerate() {
        let b = as_bignum(arg, "divb", i + 1)?;
        if b.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        acc = Bignum::div(&acc, &b);
    }
    Ok(Value::BigNum(acc))
}

pub fn builtin_to_bnum(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("to-bnum", "1", args.len()));
    }
    let n = match &args[0] {
        Value::IntNum(n) => *n,
        other => return Err(EvalError::type_error("to-bnum", "Integer Number", other.type_name(), 0)),
    };
    Ok(Value::BigNum(Bignum::from_i64(n)))
}

/// `+1` if `a < b`, `-1` if `a > b`, `0` if equal — the inverted convention
/// spec.md §4.1/§8 asks tests to assert on directly.
pub fn builtin_cmp_bnum(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("cmp-bnum", "2", args.len()));
    }
    let a = as_bignum(&args[0], "cmp-bnum", 0)?;
    let b = as_bignum(&args[1], "cmp-bnum", 1)?;
    Ok(Value::IntNum(Bignum::compare(&a, &b) as i64))
}

pub fn register(env: &Rc<Environment>) {
    env.put("addb", Value::Fun(Function::Builtin(builtin_addb)));
    env.put("subb", Value::Fun(Function::Builtin(builtin_subb)));
    env.put("mulb", Value::Fun(Function::Builtin(builtin_mulb)));
    env.put("divb", Value::Fun(Function::Builtin(builtin_divb)));
    env.put("to-bnum", Value::Fun(Function::Builtin(builtin_to_bnum)));
    env.put("cmp-bnum", Value::Fun(Function::Builtin(builtin_cmp_bnum)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(f: crate::value::BuiltinFn, args: Vec<Value>) -> Value {
        let env = Environment::new();
        f(&env, &args).unwrap_or_else(|e| Value::Err(e.to_string()))
    }

    #[test]
    fn to_bnum_then_cmp_bnum_matches_spec_scenario() {
        let five = call(builtin_to_bnum, vec![Value::IntNum(5)]);
        let seven = call(builtin_to_bnum, vec![Value::IntNum(7)]);
        let result = call(builtin_cmp_bnum, vec![five, seven]);
        assert!(matches!(result, Value::IntNum(1)));
    }

    #[test]
    fn addb_promotes_plain_integers() {
        let result = call(builtin_addb, vec![Value::IntNum(2), Value::IntNum(3)]);
        assert_eq!(result.to_string(), "5");
    }

    #[test]
    fn divb_by_zero_errors() {
        let result = call(builtin_divb, vec![Value::IntNum(10), Value::IntNum(0)]);
        assert_eq!(result.to_string(), "Error: Division By Zero.");
    }
}
