//! Numba JIT environments.
//!
//! Every pixi environment named `nb*` provides a Python interpreter with
//! Numba installed. Each becomes a "compiler" whose name carries the Numba
//! version; the newest version (by PEP 440 precedence) is the default, and
//! among equal versions the environment `pixi info` lists first wins.

pub mod wrapper;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use futures::future::try_join_all;
use pep440_rs::Version;

use crate::config::{Layout, Platform};
use crate::error::{PlaygroundError, Result};
use crate::pixi::{EnvManager, Info, Package};
use crate::render::{Renderer, NUMBA_TEMPLATE};
use crate::toolchain::lookup::which_in;
use crate::toolchain::{Context, Descriptor, Field};

/// Environments with this name prefix are Numba environments.
pub const ENVIRONMENT_PREFIX: &str = "nb";

/// Package whose version names each environment.
pub const PACKAGE: &str = "numba";

/// Version probe the service runs through an environment's interpreter.
pub const VERSION_HELPER: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/scripts/numba_version.py"
));

/// Directory holding an environment's `python`.
pub fn interpreter_dir(platform: Platform, prefix: &Path) -> PathBuf {
    if platform.is_windows() {
        prefix.to_path_buf()
    } else {
        prefix.join("bin")
    }
}

/// Build the Numba context from the environments listed in `info`.
pub async fn context(
    manager: &dyn EnvManager,
    platform: Platform,
    info: &Info,
    demangler: &str,
) -> Result<Context> {
    let mut entries = Vec::new();
    for env in info.environments_with_prefix(ENVIRONMENT_PREFIX) {
        let dir = interpreter_dir(platform, &env.prefix);
        let exe = which_in("python", dir.as_os_str())?;
        entries.push((env.name.clone(), Descriptor::new("", exe)));
    }

    let versions = try_join_all(
        entries
            .iter()
            .map(|(name, _)| package_version(manager, name.as_str())),
    )
    .await?;
    for ((_, descriptor), version) in entries.iter_mut().zip(versions) {
        let name = format!("{PACKAGE} {version}");
        descriptor.set(Field::Name, name);
    }

    let default = select_default(entries.iter().map(|(id, descriptor)| (id, descriptor)))?;
    tracing::info!("Default Numba environment: {}", default);

    Ok(Context {
        default_compiler: Some(default),
        demangler: demangler.to_string(),
        objdumper: None,
        llvm_disassembler: None,
        compiler: entries.into_iter().collect(),
    })
}

/// Version of [`PACKAGE`] installed in environment `name`.
async fn package_version(manager: &dyn EnvManager, name: &str) -> Result<String> {
    let pattern = format!("^{PACKAGE}$");
    let stdout = manager
        .run(&["ls", "-e", name, "--json", pattern.as_str()])
        .await?;
    let packages: Vec<Package> = serde_json::from_slice(&stdout)?;
    packages
        .into_iter()
        .find(|package| package.name == PACKAGE)
        .map(|package| package.version)
        .ok_or_else(|| PlaygroundError::PackageNotFound {
            package: PACKAGE.to_string(),
            environment: name.to_string(),
        })
}

/// Id of the descriptor with the highest Numba version.
///
/// Ties keep the first candidate, so callers pass environments in the order
/// `pixi info` lists them.
pub fn select_default<'a>(
    candidates: impl IntoIterator<Item = (&'a String, &'a Descriptor)>,
) -> Result<String> {
    let mut best: Option<(Version, &String)> = None;
    for (id, descriptor) in candidates {
        let version = parse_version(descriptor.name())?;
        if best.as_ref().is_none_or(|(top, _)| version > *top) {
            best = Some((version, id));
        }
    }
    best.map(|(_, id)| id.clone())
        .ok_or_else(|| PlaygroundError::NoEnvironments {
            prefix: ENVIRONMENT_PREFIX.to_string(),
        })
}

/// Parse the version out of a `numba <version>` descriptor name.
fn parse_version(name: &str) -> Result<Version> {
    let raw = name
        .strip_prefix(PACKAGE)
        .map(str::trim_start)
        .unwrap_or(name);
    Version::from_str(raw).map_err(|e| PlaygroundError::InvalidVersion {
        version: raw.to_string(),
        message: e.to_string(),
    })
}

/// Patch the wrapper, install the version helper and write
/// `numba.local.properties`.
pub async fn local_properties(
    layout: &Layout,
    renderer: &Renderer,
    manager: &dyn EnvManager,
    platform: Platform,
    info: &Info,
    demangler: &str,
) -> Result<Context> {
    wrapper::patch_file(&layout.numba_wrapper())?;

    let helper = layout.version_flag_py();
    if let Some(parent) = helper.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&helper, VERSION_HELPER)?;
    tracing::info!("Wrote {}", helper.display());

    let context = context(manager, platform, info, demangler).await?;
    renderer.write(NUMBA_TEMPLATE, &context, &layout.numba_properties())?;
    Ok(context)
}
