// ABOUTME: Capability-based filesystem sandbox for the `load` builtin

use crate::config::FsConfig;
use cap_std::fs::Dir;

#[derive(Debug, Clone)]
pub enum SandboxError {
    PathNotAllowed(String),
    FileNotFound(String),
    IoError(String),
}

impl std::fmt::Display for SandboxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SandboxError::PathNotAllowed(path) => write!(f, "Access denied: {path} is not in allowed paths"),
            SandboxError::FileNotFound(path) => write!(f, "File not found: {path}"),
            SandboxError::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for SandboxError {}

/// Filesystem access scoped to a set of roots, opened once at startup via
/// `cap_std::ambient_authority()`. Every path a Lisp program names is
/// resolved against these roots, which reject absolute paths and `..`
/// traversal by construction.
pub struct Sandbox {
    fs_roots: Vec<Dir>,
    max_file_size: usize,
}

impl Sandbox {
    pub fn new(fs_config: FsConfig) -> Result<Self, SandboxError> {
        let mut fs_roots = Vec::new();
        for path in &fs_config.allowed_paths {
            let dir = Dir::open_ambient_dir(path, cap_std::ambient_authority())
                .map_err(|e| SandboxError::IoError(format!("Cannot open {}: {e}", path.display())))?;
            fs_roots.push(dir);
        }
        Ok(Self {
            fs_roots,
            max_file_size: fs_config.max_file_size,
        })
    }

    fn validate(path: &str) -> Result<(), SandboxError> {
        if path.starts_with('/') || path.starts_with('\\') || path.contains("..") {
            return Err(SandboxError::PathNotAllowed(path.to_string()));
        }
        Ok(())
    }

    /// Reads `path` from the first sandbox root where it exists.
    pub fn read_file(&self, path: &str) -> Result<String, SandboxError> {
        Self::validate(path)?;
        for root in &self.fs_roots {
            match root.read_to_string(path) {
                Ok(contents) if contents.len() > self.max_file_size => {
                    return Err(SandboxError::IoError(format!(
                        "{path} exceeds max file size of {} bytes",
                        self.max_file_size
                    )))
                }
                Ok(contents) => return Ok(contents),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(SandboxError::IoError(format!("Cannot read {path}: {e}"))),
            }
        }
        Err(SandboxError::FileNotFound(path.to_string()))
    }
}
