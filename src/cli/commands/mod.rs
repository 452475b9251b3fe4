//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`ce-playground configure`, `ce-playground unpack`)
//! - Settings resolved once and shared by every command

pub mod configure;
pub mod dispatcher;
pub mod unpack;

pub use dispatcher::{Command, CommandDispatcher};
