//! Compiler toolchain detection.
//!
//! Each toolchain environment is turned into a [`Descriptor`] by folding an
//! ordered chain of stages over an empty map (see [`stages`]). The C and C++
//! front ends share the chain and differ only in the variables they read
//! and the default language-standard flags.
//!
//! - [`descriptor`] - descriptor fields and map
//! - [`context`] - template context bundling descriptors with shared tools
//! - [`lookup`] - executable lookup and path normalization
//! - [`version`] - version banner probing
//! - [`stages`] - the GNU → Clang → Intel LLVM → MSVC chain
//! - [`c`] / [`cpp`] - language front ends writing the property files

pub mod c;
pub mod context;
pub mod cpp;
pub mod descriptor;
pub mod lookup;
pub mod stages;
pub mod version;

pub use context::Context;
pub use descriptor::{Descriptor, Field};
pub use version::{CommandProbe, VersionProbe, VersionQuery};

use std::collections::BTreeMap;
use std::fmt;

use crate::config::Platform;
use crate::error::{PlaygroundError, Result};
use crate::pixi::EnvVars;

/// Compiler families, one pixi environment each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Toolchain {
    Gcc,
    Clang,
    Intel,
    Msvc,
}

impl Toolchain {
    /// Environment name and compiler id suffix.
    pub fn key(self) -> &'static str {
        match self {
            Toolchain::Gcc => "gcc",
            Toolchain::Clang => "clang",
            Toolchain::Intel => "intel",
            Toolchain::Msvc => "msvc",
        }
    }

    /// Toolchain selected by default on `platform`.
    pub fn default_for(platform: Platform) -> Self {
        match platform {
            Platform::Linux => Toolchain::Gcc,
            Platform::Darwin => Toolchain::Clang,
            Platform::Windows => Toolchain::Msvc,
        }
    }

    /// `cl.exe` has no version flag; it prints its banner when run bare.
    pub fn version_query(self) -> VersionQuery {
        match self {
            Toolchain::Msvc => VersionQuery::Bare,
            _ => VersionQuery::Flag("--version"),
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Language front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Cxx,
}

impl Language {
    /// Variable naming the compiler executable.
    pub fn exe_var(self) -> &'static str {
        match self {
            Language::C => "CC",
            Language::Cxx => "CXX",
        }
    }

    /// Variable holding user-supplied flags.
    pub fn flags_var(self) -> &'static str {
        match self {
            Language::C => "CFLAGS",
            Language::Cxx => "CXXFLAGS",
        }
    }

    /// Compiler id used in the property file.
    ///
    /// C ids carry a `c` prefix so they stay distinct from the C++ ids.
    pub fn compiler_id(self, toolchain: Toolchain) -> String {
        match self {
            Language::C => format!("c{}", toolchain.key()),
            Language::Cxx => toolchain.key().to_string(),
        }
    }

    /// Default language-standard flags for a toolchain.
    pub fn default_options(self, toolchain: Toolchain, platform: Platform) -> &'static str {
        match self {
            Language::C => c::default_options(toolchain, platform),
            Language::Cxx => cpp::default_options(toolchain, platform),
        }
    }
}

/// Everything the front ends need to build descriptors.
pub struct Toolchains<'a> {
    pub platform: Platform,

    /// Variable maps of the probed toolchain environments.
    pub environments: &'a BTreeMap<Toolchain, EnvVars>,

    /// Environment of this process, for tools outside any toolchain.
    pub host: &'a EnvVars,

    pub probe: &'a dyn VersionProbe,
}

impl Toolchains<'_> {
    /// Variables of a toolchain that must have been probed.
    pub fn environment(&self, toolchain: Toolchain) -> Result<&EnvVars> {
        self.environments
            .get(&toolchain)
            .ok_or_else(|| PlaygroundError::MissingEnvironment {
                name: toolchain.key().to_string(),
            })
    }

    /// One descriptor per probed toolchain, keyed by compiler id.
    pub fn descriptors(&self, language: Language) -> Result<BTreeMap<String, Descriptor>> {
        let mut compilers = BTreeMap::new();
        for (&toolchain, env) in self.environments {
            let input = stages::StageInput {
                platform: self.platform,
                language,
                toolchain,
                env,
                probe: self.probe,
            };
            let descriptor = stages::build(&input)?;
            tracing::info!("Detected {}", descriptor.name());
            compilers.insert(language.compiler_id(toolchain), descriptor);
        }
        Ok(compilers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_toolchain_per_platform() {
        assert_eq!(Toolchain::default_for(Platform::Linux), Toolchain::Gcc);
        assert_eq!(Toolchain::default_for(Platform::Darwin), Toolchain::Clang);
        assert_eq!(Toolchain::default_for(Platform::Windows), Toolchain::Msvc);
    }

    #[test]
    fn compiler_ids_are_prefixed_for_c() {
        assert_eq!(Language::C.compiler_id(Toolchain::Gcc), "cgcc");
        assert_eq!(Language::Cxx.compiler_id(Toolchain::Gcc), "gcc");
    }

    #[test]
    fn msvc_queries_version_bare() {
        assert_eq!(Toolchain::Msvc.version_query(), VersionQuery::Bare);
        assert_eq!(
            Toolchain::Clang.version_query(),
            VersionQuery::Flag("--version")
        );
    }

    #[test]
    fn missing_environment_is_reported() {
        let environments = BTreeMap::new();
        let host = EnvVars::default();
        let toolchains = Toolchains {
            platform: Platform::Linux,
            environments: &environments,
            host: &host,
            probe: &CommandProbe,
        };
        let err = toolchains.environment(Toolchain::Clang).unwrap_err();
        assert!(matches!(err, PlaygroundError::MissingEnvironment { ref name } if name == "clang"));
    }
}
