//! Custom error types with exit codes

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for setup operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SetupError {
    /// Configuration Error - setup file missing or unreadable
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The setup file is not valid INI
    #[error("Malformed setup file at line {line}: {message}")]
    ConfigParse { line: usize, message: String },

    /// A required INI section is absent
    #[error("Section [{section}] is missing in setup file")]
    MissingSection { section: String },

    /// A required key is absent from the setup section
    #[error("Key '{key}' is missing in setup file")]
    MissingKey { key: String },

    /// The mail server certificate does not exist
    #[error("Certificate file {} is missing!", path.display())]
    CertificateMissing { path: PathBuf },

    /// A template could not be read
    #[error("Cannot read {}!", path.display())]
    TemplateRead { path: PathBuf },

    /// A template has no `# <output-path>` header line
    #[error("Template {} has no destination path header", path.display())]
    MissingHeader { path: PathBuf },

    /// A rendered file could not be written
    #[error("Failed to write {}!", path.display())]
    TemplateWrite { path: PathBuf },

    /// Filesystem Error - directory or permission operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },

    /// Command Error - an external command failed
    #[error("Command error: {message}")]
    Command { message: String },

    /// Interactive input could not be read
    #[error("Prompt error: {message}")]
    Prompt { message: String },
}

impl SetupError {
    /// Get the process exit code for this error
    ///
    /// Every setup step failure is reported as 1; argument errors are
    /// handled by clap and exit with 2 before any step runs.
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. }
            | Self::ConfigParse { .. }
            | Self::MissingSection { .. }
            | Self::MissingKey { .. }
            | Self::CertificateMissing { .. }
            | Self::TemplateRead { .. }
            | Self::MissingHeader { .. }
            | Self::TemplateWrite { .. }
            | Self::Filesystem { .. }
            | Self::Command { .. }
            | Self::Prompt { .. } => 1,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an INI parse error
    #[inline]
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        Self::ConfigParse {
            line,
            message: message.into(),
        }
    }

    /// Create a missing key error
    #[inline]
    pub fn missing_key<S: Into<String>>(key: S) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Create a missing header error
    #[inline]
    pub fn missing_header(path: &Path) -> Self {
        Self::MissingHeader {
            path: path.to_path_buf(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }

    /// Create a command error
    #[inline]
    pub fn command<S: Into<String>>(message: S) -> Self {
        Self::Command {
            message: message.into(),
        }
    }

    /// Create a prompt error
    #[inline]
    pub fn prompt<S: Into<String>>(message: S) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }
}
