//! List operations: list, eval, head, tail, join, cons

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

fn require_nonempty<'a>(items: &'a [Value], function: &str, position: usize) -> Result<&'a [Value], EvalError> {
    if items.is_empty() {
        Err(EvalError::EmptyArgument {
            function: function.to_string(),
            position,
        })
    } else {
        Ok(items)
    }
}

/// Retags the call's already-evaluated argument list to a `QExpr`.
pub fn builtin_list(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::QExpr(args.to_vec()))
}

/// Retags a single `QExpr` argument to `SExpr` and evaluates it.
pub fn builtin_eval(env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("eval", "1", args.len()));
    }
    let items = as_qexpr(&args[0], "eval", 0)?;
    Ok(eval(env, Value::SExpr(items.to_vec())))
}

pub fn builtin_head(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("head", "1", args.len()));
    }
    let items = as_qexpr(&args[0], "head", 0)?;
    let items = require_nonempty(items, "head", 0)?;
    Ok(Value::QExpr(vec![items[0].clone()]))
}

pub fn builtin_tail(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("tail", "1", args.len()));
    }
    let items = as_qexpr(&args[0], "tail", 0)?;
    let items = require_nonempty(items, "tail", 0)?;
    Ok(Value::QExpr(items[1..].to_vec()))
}

pub fn builtin_join(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    let mut result = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        result.extend(as_qexpr(arg, "join", i)?.iter().cloned());
    }
    Ok(Value::QExpr(result))
}

pub fn builtin_cons(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("cons", "2", args.len()));
    }
    let rest = as_qexpr(&args[1], "cons", 1)?;
    let mut result = vec![args[0].clone()];
    result.extend(rest.iter().cloned());
    Ok(Value::QExpr(result))
}

pub fn register(env: &Rc<Environment>) {
    env.put("list", Value::Fun(Function::Builtin(builtin_list)));
    env.put("eval", Value::Fun(Function::Builtin(builtin_eval)));
    env.put("head", Value::Fun(Function::Builtin(builtin_head)));
    env.put("tail", Value::Fun(Function::Builtin(builtin_tail)));
    env.put("join", Value::Fun(Function::Builtin(builtin_join)));
    env.put("cons", Value::Fun(Function::Builtin(builtin_cons)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(f: crate::value::BuiltinFn, args: Vec<Value>) -> Value {
        let env = Environment::new();
        f(&env, &args).unwrap_or_else(|e| Value::Err(e.to_string()))
    }

    #[test]
    fn head_and_tail_split_a_list() {
        let items = Value::QExpr(vec![Value::IntNum(1), Value::IntNum(2), Value::IntNum(3)]);
        assert_eq!(call(builtin_head, vec![items.clone()]).to_string(), "{1}");
        assert_eq!(call(builtin_tail, vec![items]).to_string(), "{2 3}");
    }

    #[test]
    fn head_of_empty_list_is_an_error() {
        let result = call(builtin_head, vec![Value::QExpr(vec![])]);
        assert!(matches!(result, Value::Err(_)));
    }

    #[test]
    fn join_concatenates_qexprs() {
        let a = Value::QExpr(vec![Value::IntNum(1)]);
        let b = Value::QExpr(vec![Value::IntNum(2), Value::IntNum(3)]);
        assert_eq!(call(builtin_join, vec![a, b]).to_string(), "{1 2 3}");
    }

    #[test]
    fn cons_prepends_an_element() {
        let rest = Value::QExpr(vec![Value::IntNum(2), Value::IntNum(3)]);
        assert_eq!(call(builtin_cons, vec![Value::IntNum(1), rest]).to_string(), "{1 2 3}");
    }

    #[test]
    fn list_retags_arguments_as_qexpr() {
        assert_eq!(call(builtin_list, vec![Value::IntNum(1), Value::IntNum(2)]).to_string(), "{1 2}");
    }

    #[test]
    fn eval_retags_and_evaluates() {
        let env = Environment::new();
        crate::builtins::arithmetic::register(&env);
        let inner = Value::QExpr(vec![Value::Sym("+".to_string()), Value::IntNum(1), Value::IntNum(2)]);
        let result = builtin_eval(&env, &[inner]).unwrap();
        assert!(matches!(result, Value::IntNum(3)));
    }
}
