//! Error types for playground configuration.
//!
//! This module defines [`PlaygroundError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Every failure is fatal. A missing tool, a missing package or a failed
//! environment-manager invocation aborts the whole run, and files already
//! written stay on disk as they are.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for playground operations.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    /// An executable could not be found on the search path.
    #[error("'{tool}' not found")]
    ToolNotFound { tool: String },

    /// A toolchain environment did not export a required variable.
    #[error("Environment variable '{name}' is not set")]
    MissingVariable { name: String },

    /// A toolchain environment was not probed on this platform.
    #[error("Toolchain environment '{name}' is not available")]
    MissingEnvironment { name: String },

    /// Version output did not contain a dotted version triple.
    #[error("No version found in output of {exe}")]
    VersionNotFound { exe: String },

    /// A package was absent from an environment's package list.
    #[error("Package '{package}' not found in environment '{environment}'")]
    PackageNotFound {
        package: String,
        environment: String,
    },

    /// No environment matched the expected name prefix.
    #[error("No environment named '{prefix}*' found")]
    NoEnvironments { prefix: String },

    /// An external command exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The host operating system has no toolchain layout.
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    /// The wrapper script no longer contains the insertion anchor.
    #[error("No 'import sys' line in {}", .path.display())]
    WrapperAnchorMissing { path: PathBuf },

    /// An archive member was rejected by the extraction filter.
    #[error("Refusing to extract '{path}': {reason}")]
    UnsafeArchiveEntry { path: String, reason: String },

    /// A version string could not be parsed.
    #[error("Invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// Template loading or rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Environment manager output was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlaygroundError {
    /// Process exit status for this error.
    ///
    /// A failed command propagates its own status when it fits a nonzero
    /// byte, falling back to 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            PlaygroundError::CommandFailed {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

/// Result type alias for playground operations.
pub type Result<T> = std::result::Result<T, PlaygroundError>;
