// ABOUTME: Evaluates Values against an environment: symbol lookup and s-expression dispatch

use crate::apply::call;
use crate::env::Environment;
use crate::value::Value;
use std::rc::Rc;

/// `eval(env, v)` per spec.md §4.6. There are no special forms: `if`,
/// `def`, `=`, and `\` are ordinary builtins reached through the same
/// s-expression path as any other call (see SPEC_FULL.md §4.6 for why this
/// departs from a trampoline-style evaluator).
pub fn eval(env: &Rc<Environment>, v: Value) -> Value {
    match v {
        Value::Sym(name) => match env.get(&name) {
            Ok(value) => value,
            Err(e) => Value::Err(e.to_string()),
        },
        Value::SExpr(children) => eval_sexpr(env, children),
        other => other,
    }
}

fn eval_sexpr(env: &Rc<Environment>, children: Vec<Value>) -> Value {
    let mut evaluated = Vec::with_capacity(children.len());
    for child in children {
        let v = eval(env, child);
        if let Value::Err(_) = v {
            return v;
        }
        evaluated.push(v);
    }

    if evaluated.is_empty() {
        return Value::SExpr(evaluated);
    }
    if evaluated.len() == 1 {
        return evaluated.into_iter().next().unwrap();
    }

    let mut iter = evaluated.into_iter();
    let f = iter.next().unwrap();
    if !matches!(f, Value::Fun(_)) {
        return Value::Err(format!(
            "S-Expression starts with incorrect type. Got {}, Expected Function.",
            f.type_name()
        ));
    }
    let args: Vec<Value> = iter.collect();
    match call(env, &f, args) {
        Ok(v) => v,
        Err(e) => Value::Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;
    use crate::reader::read;

    fn eval_str(env: &Rc<Environment>, src: &str) -> Value {
        let nodes = parse_program(src).unwrap();
        eval(env, read(&nodes[0]))
    }

    fn global_env() -> Rc<Environment> {
        let env = Environment::new();
        crate::builtins::register_all(&env);
        env
    }

    #[test]
    fn unbound_symbol_becomes_error_value() {
        let env = global_env();
        let result = eval_str(&env, "undefined-name");
        assert!(matches!(result, Value::Err(msg) if msg.contains("Unbound Symbol")));
    }

    #[test]
    fn quoted_list_is_never_evaluated() {
        let env = global_env();
        let result = eval_str(&env, "{+ 1 2}");
        assert_eq!(result.to_string(), "{+ 1 2}");
    }

    #[test]
    fn empty_sexpr_is_a_no_op_value() {
        let env = global_env();
        let result = eval_str(&env, "()");
        assert_eq!(result.to_string(), "()");
    }

    #[test]
    fn single_child_sexpr_unwraps() {
        let env = global_env();
        let result = eval_str(&env, "(5)");
        assert!(matches!(result, Value::IntNum(5)));
    }

    #[test]
    fn short_circuits_on_first_error() {
        let env = global_env();
        let result = eval_str(&env, "(+ 1 (head {}) 2)");
        match result {
            Value::Err(msg) => assert!(msg.contains("empty") || msg.contains("{}") || !msg.is_empty()),
            other => panic!("expected Err, got {other}"),
        }
    }

    #[test]
    fn non_function_head_is_an_error() {
        let env = global_env();
        let result = eval_str(&env, "(1 2 3)");
        assert!(matches!(result, Value::Err(msg) if msg.contains("incorrect type")));
    }

    #[test]
    fn arithmetic_scenarios_from_spec() {
        let env = global_env();
        assert_eq!(eval_str(&env, "(+ 1 2 3)").to_string(), "6");
        assert_eq!(eval_str(&env, "(+ 1.0 2 3)").to_string(), "6.000000");
    }

    #[test]
    fn if_branches_on_numeric_condition() {
        let env = global_env();
        let result = eval_str(&env, "(if (> 2 1) {+ 1 1} {+ 0 0})");
        assert_eq!(result.to_string(), "2");
    }
}
