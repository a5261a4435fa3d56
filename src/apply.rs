// ABOUTME: Function application: builtin dispatch, formal/actual binding, partial application

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::value::{Function, Value};
use std::collections::VecDeque;
use std::rc::Rc;

/// Total arity a lambda was declared with, for arity-error messages: the
/// formal count plus one more if it takes a `&`-rest parameter.
fn declared_arity(formals: &[String], rest: &Option<String>) -> usize {
    formals.len() + if rest.is_some() { 1 } else { 0 }
}

/// Implements the application algorithm of spec.md §4.5. `args` is already
/// evaluated. A builtin is invoked directly; a lambda binds formals to
/// arguments left to right, supports a single `&`-rest parameter, and
/// returns either the evaluated body (once every formal is bound) or a
/// partially-applied copy of itself.
pub fn call(env_caller: &Rc<Environment>, f: &Value, args: Vec<Value>) -> Result<Value, EvalError> {
    let function = match f {
        Value::Fun(function) => function.clone(),
        other => {
            return Err(EvalError::BadSexprHead {
                got: other.type_name().to_string(),
                expected: "Function".to_string(),
            })
        }
    };

    match function {
        Function::Builtin(builtin) => builtin(env_caller, &args),
        Function::Lambda {
            env,
            mut formals,
            mut rest,
            body,
        } => {
            let given = args.len();
            let total = declared_arity(&formals, &rest);
            let mut queue: VecDeque<Value> = args.into();

            // `env` is the lambda's captured environment, shared (via `Rc`)
            // with every other value that still holds this lambda — binding
            // or re-parenting it in place would leak into other callers and,
            // on self-recursion, re-parent an environment onto itself. Each
            // call gets its own copy (spec.md §4.3 `copy`: bindings deep-
            // copied, parent pointer shared) to bind into instead.
            let call_env = env.copy();

            while let Some(arg) = queue.pop_front() {
                if formals.is_empty() {
                    match rest.take() {
                        Some(name) => {
                            let mut remaining = vec![arg];
                            remaining.extend(queue.drain(..));
                            call_env.put(&name, Value::QExpr(remaining));
                            break;
                        }
                        None => {
                            return Err(EvalError::TooManyArguments {
                                got: given,
                                expected: total,
                            })
                        }
                    }
                }
                let name = formals.remove(0);
                call_env.put(&name, arg);
            }

            // Formals exhausted but the rest parameter never received an
            // explicit argument list: it's bound to the empty list.
            if formals.is_empty() {
                if let Some(name) = rest.take() {
                    call_env.put(&name, Value::QExpr(Vec::new()));
                }
            }

            if formals.is_empty() {
                call_env.set_parent(env_caller.clone());
                // Mirrors the original's `builtin_eval`: the lambda body is
                // stored as a QExpr and is retagged to an SExpr to evaluate it.
                let body_sexpr = match *body {
                    Value::QExpr(items) => Value::SExpr(items),
                    other => other,
                };
                eval(&call_env, body_sexpr)
            } else {
                Ok(Value::Fun(Function::Lambda { env: call_env, formals, rest, body }))
            }
        }
    }
}
