//! C++ front end.
//!
//! Shares the C stage chain; reads `CXX`/`CXXFLAGS` and uses C++ standard
//! flags. Tool paths come from the C context.

use super::{Context, Language, Toolchain, Toolchains};
use crate::config::{Layout, Platform};
use crate::error::Result;
use crate::render::{Renderer, COMPILER_TEMPLATE};

/// Default C++ standard flags.
///
/// On Windows, Intel and MSVC share the `cl`-style driver flags.
pub fn default_options(toolchain: Toolchain, platform: Platform) -> &'static str {
    match toolchain {
        Toolchain::Intel | Toolchain::Msvc if platform.is_windows() => {
            "-EHsc -std:c++latest -utf-8"
        }
        _ => "-std=c++2c",
    }
}

/// Build the C++ context on top of the C context's shared tools.
pub fn context(base: &Context, toolchains: &Toolchains<'_>) -> Result<Context> {
    let default = Toolchain::default_for(toolchains.platform);
    let mut context = base.with_shared_tools();
    context.default_compiler = Some(default.key().to_string());
    context.compiler = toolchains.descriptors(Language::Cxx)?;
    Ok(context)
}

/// Write `c++.local.properties`.
pub fn local_properties(
    base: &Context,
    layout: &Layout,
    renderer: &Renderer,
    toolchains: &Toolchains<'_>,
) -> Result<Context> {
    let context = context(base, toolchains)?;
    renderer.write(COMPILER_TEMPLATE, &context, &layout.cpp_properties())?;
    Ok(context)
}
