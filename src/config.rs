// ABOUTME: Version banner and filesystem-sandbox configuration for the interpreter

use std::path::PathBuf;

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "lispy REPL";
pub const WELCOME_SUBTITLE: &str = "a small homoiconic Lisp with arbitrary-precision integers";

/// Filesystem sandbox configuration for the `load` builtin (spec.md §4.7).
#[derive(Debug, Clone)]
pub struct FsConfig {
    pub allowed_paths: Vec<PathBuf>,
    pub max_file_size: usize,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            allowed_paths: vec![PathBuf::from(".")],
            max_file_size: 10 * 1024 * 1024,
        }
    }
}
