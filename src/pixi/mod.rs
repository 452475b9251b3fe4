//! Environment manager client.
//!
//! Toolchains live in named pixi environments. This module wraps the
//! `pixi` command line behind the [`EnvManager`] trait and probes the
//! environments the descriptor builders need:
//! - [`info`] - JSON shapes of `info --json` and `ls --json`
//! - [`env_vars`] - variable maps exported by toolchain environments
//! - [`probe`] - the concurrent start-up query group

pub mod env_vars;
pub mod info;
pub mod probe;

pub use env_vars::EnvVars;
pub use info::{EnvironmentInfo, Info, Package};
pub use probe::{probe, Probe};

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{PlaygroundError, Result};

/// Runs environment manager subcommands.
#[async_trait]
pub trait EnvManager: Send + Sync {
    /// Run a subcommand and return its standard output.
    ///
    /// A nonzero exit status is reported as [`PlaygroundError::CommandFailed`].
    async fn run(&self, args: &[&str]) -> Result<Vec<u8>>;
}

/// The `pixi` executable.
#[derive(Debug, Clone)]
pub struct Pixi {
    program: String,
}

impl Pixi {
    /// Use `program` as the pixi executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl EnvManager for Pixi {
    async fn run(&self, args: &[&str]) -> Result<Vec<u8>> {
        let command = format!("{} -q {}", self.program, args.join(" "));
        tracing::debug!("Running: {}", command);

        let output = Command::new(&self.program)
            .arg("-q")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => PlaygroundError::ToolNotFound {
                    tool: self.program.clone(),
                },
                _ => PlaygroundError::Io(e),
            })?;

        if !output.status.success() {
            return Err(PlaygroundError::CommandFailed {
                command,
                code: output.status.code(),
            });
        }

        Ok(output.stdout)
    }
}
