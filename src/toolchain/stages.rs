//! The descriptor derivation chain.
//!
//! A descriptor starts empty and passes through the stages of its
//! toolchain, left to right. Each stage sees the map built so far plus the
//! raw environment and may add, override or retract fields:
//!
//! | Toolchain | Stages                           |
//! |-----------|----------------------------------|
//! | gcc       | gnu                              |
//! | clang     | gnu, clang                       |
//! | intel     | gnu, clang, intel_llvm           |
//! | msvc      | gnu, clang, intel_llvm, msvc     |

use std::borrow::Cow;
use std::path::Path;

use super::lookup::{normalize_list, which};
use super::version::{detect_version, display_name};
use super::{Descriptor, Field, Language, Toolchain, VersionProbe};
use crate::config::Platform;
use crate::error::Result;
use crate::pixi::EnvVars;

/// Inputs shared by every stage of one descriptor.
pub struct StageInput<'a> {
    pub platform: Platform,
    pub language: Language,
    pub toolchain: Toolchain,
    pub env: &'a EnvVars,
    pub probe: &'a dyn VersionProbe,
}

/// One transformation of the descriptor map.
pub type Stage = fn(Descriptor, &StageInput<'_>) -> Result<Descriptor>;

/// Stages applied for `toolchain`, in order.
pub fn stages(toolchain: Toolchain) -> &'static [Stage] {
    match toolchain {
        Toolchain::Gcc => &[gnu],
        Toolchain::Clang => &[gnu, clang],
        Toolchain::Intel => &[gnu, clang, intel_llvm],
        Toolchain::Msvc => &[gnu, clang, intel_llvm, msvc],
    }
}

/// Fold the toolchain's stages over an empty descriptor.
pub fn build(input: &StageInput<'_>) -> Result<Descriptor> {
    stages(input.toolchain)
        .iter()
        .try_fold(Descriptor::default(), |descriptor, stage| {
            stage(descriptor, input)
        })
}

/// GNU-style base: executable, version, flags and x86-64 defaults.
pub fn gnu(mut d: Descriptor, input: &StageInput<'_>) -> Result<Descriptor> {
    let env = input.env;
    let exe = which(env.require(input.language.exe_var())?, env)?;
    let version = detect_version(input.probe, &exe, input.toolchain.version_query())?;
    let options = join_flags(&[
        env.get(input.language.flags_var()).unwrap_or_default(),
        input
            .language
            .default_options(input.toolchain, input.platform),
    ]);

    d.set(
        Field::Name,
        format!("{} {}", display_name(&exe, input.platform.is_windows()), version),
    )
    .set(Field::Exe, exe)
    .set(Field::Options, options)
    .set(Field::InstructionSet, "amd64")
    .set(Field::IncludeFlag, "-I")
    .set(Field::UnwiseOptions, "-march=native");

    if input.platform.is_windows() {
        d.set(Field::CompilerType, "win32-mingw-gcc");
    }
    Ok(d)
}

/// Clang family: Intel assembly syntax, Windows demangler and SDK paths.
pub fn clang(mut d: Descriptor, input: &StageInput<'_>) -> Result<Descriptor> {
    d.set(Field::CompilerType, "clang")
        .set(Field::IntelAsm, "-mllvm --x86-asm-syntax=intel");

    if input.platform.is_windows() {
        let env = input.env;
        d.set(Field::Demangler, which("undname", env)?)
            .set(Field::DemanglerType, "win32")
            .set(
                Field::IncludePath,
                normalize_list(input.platform, env.require("INCLUDE")?),
            )
            .set(
                Field::LibPath,
                normalize_list(input.platform, env.require("LIB")?),
            );
    }
    Ok(d)
}

/// Intel oneAPI LLVM compilers.
pub fn intel_llvm(mut d: Descriptor, input: &StageInput<'_>) -> Result<Descriptor> {
    prepend_include(&mut d, input, "opt/compiler/include")?;

    if input.platform.is_windows() {
        prepend_include(&mut d, input, "include")?;
        d.set(Field::CompilerType, "win32-vc");
    } else {
        let sysroot = input.env.require("CONDA_BUILD_SYSROOT")?;
        let mut args: Vec<String> = d
            .get(Field::Options)
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        args.push(format!("--sysroot={sysroot}"));

        d.set(Field::CompilerType, "clang-intel")
            .set(Field::IntelAsm, "-masm=intel")
            .set(Field::Options, shell_join(&args));
    }

    d.remove(Field::UnwiseOptions);
    Ok(d)
}

/// MSVC `cl.exe`: banner-based version detection, no Intel syntax switch.
pub fn msvc(mut d: Descriptor, _input: &StageInput<'_>) -> Result<Descriptor> {
    d.set(Field::VersionFlag, "@etc/config/versionFlag.txt")
        .set(Field::VersionRe, r"^.*Microsoft \(R\).*$");
    d.remove(Field::IntelAsm);
    Ok(d)
}

/// Prepend `$CONDA_PREFIX/<subdir>` to the include path if it exists.
fn prepend_include(d: &mut Descriptor, input: &StageInput<'_>, subdir: &str) -> Result<()> {
    let include = subdir
        .split('/')
        .fold(Path::new(input.env.require("CONDA_PREFIX")?).to_path_buf(), |p, s| {
            p.join(s)
        });
    if include.is_dir() {
        let include = include.to_string_lossy();
        let separator = input.platform.path_list_separator().to_string();
        let joined = [include.as_ref(), d.get(Field::IncludePath).unwrap_or_default()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(&separator);
        d.set(Field::IncludePath, joined);
    }
    Ok(())
}

/// Join flag strings with single spaces, skipping empty ones.
pub fn join_flags(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote one argument for a POSIX shell.
pub fn shell_quote(arg: &str) -> Cow<'_, str> {
    if arg.is_empty() {
        return Cow::Borrowed("''");
    }
    let safe = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if safe {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r#"'"'"'"#)))
    }
}

/// Join arguments into a POSIX shell command line.
pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}
