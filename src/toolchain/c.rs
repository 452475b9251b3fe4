//! C front end.
//!
//! Builds the C context, which also seeds the shared tool paths reused by
//! the C++ and Numba property files.

use std::fs;

use super::lookup::which;
use super::{Context, Language, Toolchain, Toolchains};
use crate::config::{Layout, Platform};
use crate::error::Result;
use crate::render::{Renderer, COMPILER_TEMPLATE};

/// Response file that makes `cl.exe` compile nothing and print its banner.
pub const MSVC_VERSION_FLAG: &[u8] = b"-c nul\n";

/// Default C standard flags.
pub fn default_options(toolchain: Toolchain, platform: Platform) -> &'static str {
    match toolchain {
        Toolchain::Msvc => "-std:clatest -utf-8",
        Toolchain::Intel if platform.is_windows() => "-masm=intel -Qstd:c18",
        _ => "-std=c2y",
    }
}

/// Build the C context.
pub fn context(toolchains: &Toolchains<'_>) -> Result<Context> {
    let clang = toolchains.environment(Toolchain::Clang)?;
    let objdumper = match toolchains.platform {
        Platform::Linux | Platform::Windows => {
            let gcc = toolchains.environment(Toolchain::Gcc)?;
            which(gcc.require("OBJDUMP")?, gcc)?
        }
        Platform::Darwin => which("objdump", toolchains.host)?,
    };

    Ok(Context {
        default_compiler: Some(Toolchain::default_for(toolchains.platform).key().to_string()),
        demangler: which("llvm-cxxfilt", clang)?,
        objdumper: Some(objdumper),
        llvm_disassembler: Some(which("llvm-dis", clang)?),
        compiler: toolchains.descriptors(Language::C)?,
    })
}

/// Write `c.local.properties` (and the MSVC response file on Windows).
pub fn local_properties(
    layout: &Layout,
    renderer: &Renderer,
    toolchains: &Toolchains<'_>,
) -> Result<Context> {
    let context = context(toolchains)?;

    if toolchains.platform.is_windows() {
        let path = layout.version_flag_txt();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, MSVC_VERSION_FLAG)?;
        tracing::info!("Wrote {}", path.display());
    }

    renderer.write(COMPILER_TEMPLATE, &context, &layout.c_properties())?;
    Ok(context)
}
