//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Layout, Platform, Settings};

/// ce-playground - Configure a local Compiler Explorer from pixi environments.
#[derive(Debug, Parser)]
#[command(name = "ce-playground")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Compiler Explorer tree to configure
    #[arg(
        long,
        global = true,
        env = "CE_PLAYGROUND_TARGET",
        default_value = "compiler-explorer"
    )]
    pub target: PathBuf,

    /// Distribution bundle to unpack
    #[arg(
        long,
        global = true,
        env = "CE_PLAYGROUND_ARCHIVE",
        default_value = "dist.zip"
    )]
    pub archive: PathBuf,

    /// Environment manager executable
    #[arg(long, global = true, env = "CE_PLAYGROUND_PIXI", default_value = "pixi")]
    pub pixi: String,

    /// Load templates from this directory instead of the built-in ones
    #[arg(long, global = true, env = "CE_PLAYGROUND_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Skip unpacking the distribution bundle before configuring
    #[arg(long, global = true)]
    pub skip_unpack: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Resolve the run settings for `platform`.
    pub fn settings(&self, platform: Platform) -> Settings {
        Settings {
            platform,
            layout: Layout::new(&self.target),
            archive: self.archive.clone(),
            pixi: self.pixi.clone(),
            templates: self.templates.clone(),
            skip_unpack: self.skip_unpack,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Unpack the bundle and write all property files (default)
    Configure,

    /// Only unpack the distribution bundle
    Unpack,
}
