//! Numeric operators: +, -, *, /, ^, %
//!
//! All five share one generic fold (spec.md §4.4): operands must be
//! `IntNum`/`FloatNum`, unary `-`/`/`/`^` have special meanings, and
//! otherwise the arguments fold left over a float accumulator, with the
//! result truncated back to `IntNum` only if every operand was an integer.

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

fn as_f64(v: &Value, function: &str, position: usize) -> Result<f64, EvalError> {
    match v {
        Value::IntNum(n) => Ok(*n as f64),
        Value::FloatNum(d) => Ok(*d),
        other => Err(EvalError::type_error(function, "Number", other.type_name(), position)),
    }
}

fn all_numeric(args: &[Value]) -> bool {
    args.iter().all(Value::is_number)
}

fn all_int(args: &[Value]) -> bool {
    args.iter().all(|v| matches!(v, Value::IntNum(_)))
}

/// The generic operator fold described in spec.md §4.4. `op_sym` is the
/// symbol under which the builtin is registered, used only for error text.
fn op(op_sym: &str, args: &[Value]) -> Result<Value, EvalError> {
    if !all_numeric(args) {
        return Err(EvalError::NotANumber);
    }

    if args.len() == 1 {
        let x = &args[0];
        return match op_sym {
            "-" => Ok(negate(x)),
            "/" => reciprocal(x),
            "^" => power_of_two(x),
            _ => fold(op_sym, args),
        };
    }

    fold(op_sym, args)
}

fn negate(x: &Value) -> Value {
    match x {
        Value::IntNum(n) => Value::IntNum(-n),
        Value::FloatNum(d) => Value::FloatNum(-d),
        _ => unreachable!("negate called on non-number"),
    }
}

/// `/x` computes `1/x` using the operand's own type — integer reciprocal is
/// intentional (preserved from the source; see SPEC_FULL.md §9(a)).
fn reciprocal(x: &Value) -> Result<Value, EvalError> {
    match x {
        Value::IntNum(0) => Err(EvalError::DivisionByZero),
        Value::IntNum(n) => Ok(Value::IntNum(1 / n)),
        Value::FloatNum(d) if *d == 0.0 => Err(EvalError::DivisionByZero),
        Value::FloatNum(d) => Ok(Value::FloatNum(1.0 / d)),
        _ => unreachable!("reciprocal called on non-number"),
    }
}

fn power_of_two(x: &Value) -> Result<Value, EvalError> {
    match x {
        Value::IntNum(n) => Ok(Value::IntNum(2i64.pow((*n).try_into().unwrap_or(0)))),
        Value::FloatNum(d) => Ok(Value::FloatNum(2f64.powf(*d))),
        _ => unreachable!("power_of_two called on non-number"),
    }
}

fn fold(op_sym: &str, args: &[Value]) -> Result<Value, EvalError> {
    let mut acc = as_f64(&args[0], op_sym, 0)?;
    for (i, arg) in args[1..].iter().enumerate() {
        let d = as_f64(arg, op_sym, i + 1)?;
        acc = match op_sym {
            "+" => acc + d,
            "-" => acc - d,
            "*" => acc * d,
            "/" => {
                if d == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                acc / d
            }
            "^" => acc.powf(d),
            "%" => acc % d,
            _ => unreachable!("unknown operator {op_sym}"),
        };
    }

    if all_int(args) {
        Ok(Value::IntNum(acc as i64))
    } else {
        Ok(Value::FloatNum(acc))
    }
}

pub fn builtin_add(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Ok(Value::IntNum(0));
    }
    op("+", args)
}

pub fn builtin_sub(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("-", "at least 1", 0));
    }
    op("-", args)
}

pub fn builtin_mul(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Ok(Value::IntNum(1));
    }
    op("*", args)
}

pub fn builtin_div(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("/", "at least 1", 0));
    }
    op("/", args)
}

pub fn builtin_pow(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(EvalError::arity_error("^", "at least 1", 0));
    }
    op("^", args)
}

/// `%` requires exactly two operands (IEEE remainder via `fmod`).
pub fn builtin_mod(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("%", "2", args.len()));
    }
    op("%", args)
}

pub fn register(env: &Rc<Environment>) {
    use crate::value::Function;
    env.put("+", Value::Fun(Function::Builtin(builtin_add)));
    env.put("-", Value::Fun(Function::Builtin(builtin_sub)));
    env.put("*", Value::Fun(Function::Builtin(builtin_mul)));
    env.put("/", Value::Fun(Function::Builtin(builtin_div)));
    env.put("^", Value::Fun(Function::Builtin(builtin_pow)));
    env.put("%", Value::Fun(Function::Builtin(builtin_mod)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(f: crate::value::BuiltinFn, args: Vec<Value>) -> Value {
        let env = Environment::new();
        f(&env, &args).unwrap_or_else(|e| Value::Err(e.to_string()))
    }

    #[test]
    fn sum_of_integers_stays_integer() {
        assert!(matches!(call(builtin_add, vec![Value::IntNum(1), Value::IntNum(2), Value::IntNum(3)]), Value::IntNum(6)));
    }

    #[test]
    fn mixed_int_and_float_promotes_to_float() {
        match call(builtin_add, vec![Value::FloatNum(1.0), Value::IntNum(2), Value::IntNum(3)]) {
            Value::FloatNum(d) => assert!((d - 6.0).abs() < f64::EPSILON),
            other => panic!("expected FloatNum, got {other}"),
        }
    }

    #[test]
    fn unary_minus_negates() {
        assert!(matches!(call(builtin_sub, vec![Value::IntNum(5)]), Value::IntNum(-5)));
    }

    #[test]
    fn unary_div_is_integer_reciprocal() {
        // Preserves the source's quirky integer-reciprocal behavior.
        assert!(matches!(call(builtin_div, vec![Value::IntNum(4)]), Value::IntNum(0)));
        assert!(matches!(call(builtin_div, vec![Value::IntNum(1)]), Value::IntNum(1)));
    }

    #[test]
    fn unary_pow_is_two_to_the_x() {
        assert!(matches!(call(builtin_pow, vec![Value::IntNum(3)]), Value::IntNum(8)));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let result = call(builtin_div, vec![Value::IntNum(1), Value::IntNum(0)]);
        assert_eq!(result.to_string(), "Error: Division By Zero.");
    }

    #[test]
    fn non_number_operand_is_an_error() {
        let result = call(builtin_add, vec![Value::IntNum(1), Value::Sym("x".to_string())]);
        assert_eq!(result.to_string(), "Error: Cannot operate on non-number!");
    }
}
