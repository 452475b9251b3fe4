//! Host platform detection.

use crate::error::{PlaygroundError, Result};

/// Operating systems with a known toolchain layout.
///
/// Resolved once at start and passed down, so descriptor rules for every
/// platform can be exercised on any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    Darwin,
    Windows,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a Rust OS name (`std::env::consts::OS`) to a platform.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::Darwin),
            "windows" => Ok(Platform::Windows),
            other => Err(PlaygroundError::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    /// Whether this is Windows.
    pub fn is_windows(self) -> bool {
        self == Platform::Windows
    }

    /// Separator between entries of `PATH`-like lists.
    pub fn path_list_separator(self) -> char {
        match self {
            Platform::Windows => ';',
            Platform::Linux | Platform::Darwin => ':',
        }
    }

    /// Lowercase platform name used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
            Platform::Windows => "win32",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
