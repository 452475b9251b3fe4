//! Run configuration.
//!
//! Everything a run needs is resolved once into a [`Settings`] value at
//! program start and passed down explicitly:
//! - the host [`Platform`]
//! - the output [`Layout`] of the Compiler Explorer tree
//! - the distribution archive and environment manager to use
//! - an optional template directory overriding the embedded templates

pub mod layout;
pub mod platform;

pub use layout::Layout;
pub use platform::Platform;

use std::path::PathBuf;

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Host platform.
    pub platform: Platform,

    /// Output locations.
    pub layout: Layout,

    /// Distribution bundle to unpack.
    pub archive: PathBuf,

    /// Environment manager executable.
    pub pixi: String,

    /// Template directory; `None` uses the embedded templates.
    pub templates: Option<PathBuf>,

    /// Configure without unpacking the bundle first.
    pub skip_unpack: bool,
}

impl Settings {
    /// Settings with default paths for the given platform.
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            layout: Layout::default(),
            archive: PathBuf::from("dist.zip"),
            pixi: "pixi".to_string(),
            templates: None,
            skip_unpack: false,
        }
    }
}
