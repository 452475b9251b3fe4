//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandDispatcher`] for routing CLI subcommands

use async_trait::async_trait;

use crate::cli::args::Commands;
use crate::config::Settings;
use crate::error::Result;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
#[async_trait(?Send)]
pub trait Command {
    /// Execute the command; failures carry their exit status in the error.
    async fn execute(&self) -> Result<()>;
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    settings: Settings,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Get the run settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Dispatch and execute a command.
    ///
    /// No subcommand runs `configure` with default arguments.
    pub async fn dispatch(&self, command: Option<&Commands>) -> Result<()> {
        match command {
            Some(Commands::Configure) | None => {
                let cmd = super::configure::ConfigureCommand::new(&self.settings);
                cmd.execute().await
            }
            Some(Commands::Unpack) => {
                let cmd = super::unpack::UnpackCommand::new(&self.settings);
                cmd.execute().await
            }
        }
    }
}
