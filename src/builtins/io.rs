//! Console, process, and file I/O builtins: print, error, read-line, exit,
//! gensym, range, random, load, printenv (spec.md §4.7).

use crate::env::Environment;
use crate::error::EvalError;
use crate::eval::eval;
use crate::parser::parse_program;
use crate::reader::read;
use crate::sandbox::Sandbox;
use crate::value::{Function, Value};
use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;

thread_local! {
    static SANDBOX: RefCell<Option<Sandbox>> = const { RefCell::new(None) };
    static GENSYM_COUNTER: Cell<u64> = const { Cell::new(0) };
}

/// Installs the sandbox `load` reads files through. Must be called once
/// before any script runs `(load ...)`.
pub fn set_sandbox(sandbox: Sandbox) {
    SANDBOX.with(|s| *s.borrow_mut() = Some(sandbox));
}

pub fn builtin_print(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    let mut out = String::new();
    for arg in args {
        out.push_str(&arg.to_string());
        out.push(' ');
    }
    println!("{}", out.trim_end());
    Ok(Value::SExpr(Vec::new()))
}

pub fn builtin_error(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("error", "1", args.len()));
    }
    match &args[0] {
        Value::Str(msg) => Ok(Value::Err(msg.clone())),
        other => Err(EvalError::type_error("error", "String", other.type_name(), 0)),
    }
}

pub fn builtin_read_line(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    let prompt = match args.first() {
        Some(Value::Str(s)) => s.clone(),
        _ => "?".to_string(),
    };
    print!("{prompt} ");
    std::io::stdout().flush().ok();
    let mut line = String::new();
    std::io::stdin().read_line(&mut line).map_err(|e| EvalError::Message(e.to_string()))?;
    Ok(Value::Str(line.trim_end_matches(['\n', '\r']).to_string()))
}

pub fn builtin_exit(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    let code = match args.first() {
        Some(Value::IntNum(n)) => *n as i32,
        Some(other) => return Err(EvalError::type_error("exit", "Integer Number", other.type_name(), 0)),
        None => 0,
    };
    std::process::exit(code);
}

/// Monotonically increasing unique-symbol generator (spec.md §4.7, §5).
pub fn builtin_gensym(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    let prefix = match args.first() {
        Some(Value::Str(s)) if !s.is_empty() => s.chars().next().unwrap(),
        _ => 'g',
    };
    let n = GENSYM_COUNTER.with(|c| {
        let n = c.get();
        c.set(n + 1);
        n
    });
    Ok(Value::QExpr(vec![Value::Sym(format!("{prefix}{n}"))]))
}

pub fn builtin_range(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 2 {
        return Err(EvalError::arity_error("range", "2", args.len()));
    }
    let lo = match &args[0] {
        Value::IntNum(n) => *n,
        other => return Err(EvalError::type_error("range", "Integer Number", other.type_name(), 0)),
    };
    let hi = match &args[1] {
        Value::IntNum(n) => *n,
        other => return Err(EvalError::type_error("range", "Integer Number", other.type_name(), 1)),
    };
    Ok(Value::QExpr((lo..hi).map(Value::IntNum).collect()))
}

pub fn builtin_random(_env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("random", "1", args.len()));
    }
    let n = match &args[0] {
        Value::IntNum(n) if *n > 0 => *n,
        Value::IntNum(_) => return Err(EvalError::Message("random: bound must be positive".to_string())),
        other => return Err(EvalError::type_error("random", "Integer Number", other.type_name(), 0)),
    };
    // A linear congruential step seeded from the system clock — the source
    // used libc's seeded `rand()`; this keeps the dependency surface to the
    // standard library for an operation spec.md doesn't ask to be
    // cryptographically sound.
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    Ok(Value::IntNum((seed % n as u64) as i64))
}

pub fn builtin_load(env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if args.len() != 1 {
        return Err(EvalError::arity_error("load", "1", args.len()));
    }
    let path = match &args[0] {
        Value::Str(s) => s.clone(),
        other => return Err(EvalError::type_error("load", "String", other.type_name(), 0)),
    };

    let contents = SANDBOX.with(|s| {
        s.borrow()
            .as_ref()
            .ok_or_else(|| EvalError::Message("load: sandbox not initialized".to_string()))
            .and_then(|sandbox| sandbox.read_file(&path).map_err(|e| EvalError::Message(e.to_string())))
    })?;

    let nodes = parse_program(&contents).map_err(EvalError::Message)?;
    for node in nodes {
        let result = eval(env, read(&node));
        if let Value::Err(msg) = result {
            eprintln!("Error: {msg}");
        }
    }
    Ok(Value::SExpr(Vec::new()))
}

pub fn builtin_printenv(env: &Rc<Environment>, args: &[Value]) -> Result<Value, EvalError> {
    if !args.is_empty() {
        return Err(EvalError::arity_error("printenv", "0", args.len()));
    }
    for (name, value) in env.entries() {
        println!("({name} {value})");
    }
    Ok(Value::SExpr(Vec::new()))
}

pub fn register(env: &Rc<Environment>) {
    env.put("print", Value::Fun(Function::Builtin(builtin_print)));
    env.put("error", Value::Fun(Function::Builtin(builtin_error)));
    env.put("read-line", Value::Fun(Function::Builtin(builtin_read_line)));
    env.put("exit", Value::Fun(Function::Builtin(builtin_exit)));
    env.put("gensym", Value::Fun(Function::Builtin(builtin_gensym)));
    env.put("range", Value::Fun(Function::Builtin(builtin_range)));
    env.put("random", Value::Fun(Function::Builtin(builtin_random)));
    env.put("load", Value::Fun(Function::Builtin(builtin_load)));
    env.put("printenv", Value::Fun(Function::Builtin(builtin_printenv)));
}
