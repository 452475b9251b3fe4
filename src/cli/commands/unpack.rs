//! Unpack command implementation.
//!
//! The `ce-playground unpack` command extracts the distribution bundle into
//! the Compiler Explorer tree and stops.

use async_trait::async_trait;

use crate::config::Settings;
use crate::error::Result;
use crate::unpack::unpack;

use super::dispatcher::Command;

/// The unpack command implementation.
pub struct UnpackCommand<'a> {
    settings: &'a Settings,
}

impl<'a> UnpackCommand<'a> {
    /// Create a new unpack command.
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }
}

#[async_trait(?Send)]
impl Command for UnpackCommand<'_> {
    async fn execute(&self) -> Result<()> {
        unpack(&self.settings.archive, &self.settings.layout)?;
        Ok(())
    }
}
