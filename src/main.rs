// ABOUTME: CLI entry point: REPL and file-batch front ends over the interpreter library

use clap::Parser;
use lispy::builtins;
use lispy::config::{FsConfig, VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use lispy::env::Environment;
use lispy::eval::eval;
use lispy::parser::parse_program;
use lispy::reader::read;
use lispy::sandbox::Sandbox;
use lispy::value::Value;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;
use std::rc::Rc;

/// A small homoiconic Lisp interpreter with arbitrary-precision integers
#[derive(Parser, Debug)]
#[command(name = "lispy")]
#[command(version = VERSION)]
#[command(about = "An interactive interpreter for a small homoiconic Lisp")]
struct CliArgs {
    /// Files to load and evaluate in order (omit to start the REPL)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Add allowed filesystem path for `load` (can be repeated)
    #[arg(long = "fs-sandbox", value_name = "PATH", action = clap::ArgAction::Append)]
    fs_paths: Vec<PathBuf>,

    /// Maximum file size in bytes for `load`
    #[arg(long = "max-file-size", value_name = "BYTES", default_value = "10485760")]
    max_file_size: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let fs_config = build_fs_config(&args);
    let sandbox = Sandbox::new(fs_config)?;
    builtins::io::set_sandbox(sandbox);

    let env = Environment::new();
    builtins::register_all(&env);

    if args.files.is_empty() {
        run_repl(&env)
    } else {
        run_files(&env, &args.files)
    }
}

/// Builds the sandbox config from CLI flags, defaulting to the current directory.
fn build_fs_config(args: &CliArgs) -> FsConfig {
    if args.fs_paths.is_empty() {
        FsConfig::default()
    } else {
        FsConfig {
            allowed_paths: args.fs_paths.clone(),
            max_file_size: args.max_file_size,
        }
    }
}

/// Loads and evaluates each file in order via the `load` builtin's own
/// semantics: a per-expression evaluation error is printed and the batch
/// continues (spec.md §4.7, §6).
fn run_files(env: &Rc<Environment>, files: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    for path in files {
        let path_str = path.to_string_lossy().to_string();
        let result = builtins::io::builtin_load(env, &[Value::Str(path_str)]);
        if let Err(e) = result {
            eprintln!("Error: {e}");
        }
    }
    Ok(())
}

/// Interactive read-eval-print loop, one top-level form per line.
fn run_repl(env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");

    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), _> =
        Editor::with_config(config).map_err(|e| format!("Failed to initialize REPL: {e}"))?;

    let history_file = ".lispy_history";
    let _ = rl.load_history(history_file);

    loop {
        match rl.readline("lispy> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match parse_program(&line) {
                    Ok(nodes) => {
                        for node in nodes {
                            let result = eval(env, read(&node));
                            println!("{result}");
                        }
                    }
                    Err(e) => eprintln!("Parse error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}
