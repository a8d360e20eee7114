//! System abstraction for filesystem and process operations
//!
//! This module provides a unified trait for all external system interactions,
//! allowing the setup steps to be tested with mock implementations.

use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Captured result of an external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Build a successful result with the given stdout
    #[must_use]
    #[inline]
    pub fn ok<S: Into<String>>(stdout: S) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }

    /// Build a failed result with the given exit code
    #[must_use]
    #[inline]
    pub fn failed<S: Into<String>>(code: i32, stderr: S) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
            code: Some(code),
        }
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Unified trait for system operations (filesystem + processes)
///
/// # Implementations
/// - `RealSystem`: Production implementation using `std::fs` and `std::process`
/// - `MockSystem`: Test implementation using in-memory storage and recorded commands
pub trait System {
    // ==================== Filesystem Operations ====================

    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write bytes to a file, creating or truncating it
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Recursively create a directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path points to a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read directory entries, returning paths of all entries
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Set the unix permission bits of a path
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    // ==================== Process Operations ====================

    /// Run an external program to completion, capturing its output
    ///
    /// An `Err` means the program could not be started; a nonzero exit
    /// status is reported through `CommandOutput::success`.
    fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput>;
}
