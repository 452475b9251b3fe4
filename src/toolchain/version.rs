//! Compiler version detection.

use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PlaygroundError, Result};

/// First dotted triple in a compiler banner.
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").expect("VERSION_REGEX must compile"));

/// How a compiler reports its version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionQuery {
    /// Pass a flag, e.g. `--version`.
    Flag(&'static str),
    /// Run the executable with no arguments and read its banner.
    Bare,
}

/// Runs a compiler to capture its version banner.
pub trait VersionProbe {
    /// Combined standard output and standard error of the query.
    fn banner(&self, exe: &str, query: VersionQuery) -> Result<String>;
}

/// Runs the real executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandProbe;

impl VersionProbe for CommandProbe {
    fn banner(&self, exe: &str, query: VersionQuery) -> Result<String> {
        let mut cmd = Command::new(exe);
        if let VersionQuery::Flag(flag) = query {
            cmd.arg(flag);
        }
        let rendered = match query {
            VersionQuery::Flag(flag) => format!("{exe} {flag}"),
            VersionQuery::Bare => exe.to_string(),
        };
        tracing::debug!("Running: {}", rendered);

        let output = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            return Err(PlaygroundError::CommandFailed {
                command: rendered,
                code: output.status.code(),
            });
        }

        let mut banner = String::from_utf8_lossy(&output.stdout).into_owned();
        banner.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(banner)
    }
}

/// Extract the first `major.minor.patch` from `output`.
pub fn extract_version(output: &str) -> Option<&str> {
    VERSION_REGEX.find(output).map(|m| m.as_str())
}

/// Query `exe` and extract its version.
pub fn detect_version(probe: &dyn VersionProbe, exe: &str, query: VersionQuery) -> Result<String> {
    let banner = probe.banner(exe, query)?;
    extract_version(&banner)
        .map(str::to_string)
        .ok_or_else(|| PlaygroundError::VersionNotFound {
            exe: exe.to_string(),
        })
}

/// Display name of a compiler executable: its file name, or stem on Windows.
pub fn display_name(exe: &str, windows: bool) -> String {
    // Windows separators are not path separators on other hosts
    let file = exe.rsplit(['/', '\\']).next().unwrap_or(exe);
    let file = if windows {
        Path::new(file)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file)
    } else {
        file
    };
    file.to_string()
}
