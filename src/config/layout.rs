//! Paths inside the Compiler Explorer working tree.

use std::path::{Path, PathBuf};

/// Output locations derived from the service's root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The service root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Static assets extracted from `*.static.tar.xz` members.
    pub fn static_dir(&self) -> PathBuf {
        self.root.join("static")
    }

    /// `etc/config`, home of every generated file.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join("etc").join("config")
    }

    pub fn c_properties(&self) -> PathBuf {
        self.config_dir().join("c.local.properties")
    }

    pub fn cpp_properties(&self) -> PathBuf {
        self.config_dir().join("c++.local.properties")
    }

    pub fn numba_properties(&self) -> PathBuf {
        self.config_dir().join("numba.local.properties")
    }

    /// Response file used to trigger the MSVC banner.
    pub fn version_flag_txt(&self) -> PathBuf {
        self.config_dir().join("versionFlag.txt")
    }

    /// Helper script the service runs to query the Numba version.
    pub fn version_flag_py(&self) -> PathBuf {
        self.config_dir().join("versionFlag.py")
    }

    /// Service-provided Numba wrapper, patched in place.
    pub fn numba_wrapper(&self) -> PathBuf {
        self.root.join("etc").join("scripts").join("numba_wrapper.py")
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new("compiler-explorer")
    }
}
