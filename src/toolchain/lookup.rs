//! Executable lookup and path normalization.
//!
//! Tools are resolved against the `PATH` an environment exports, not the
//! `PATH` of this process, so each toolchain finds its own binaries.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::config::Platform;
use crate::error::{PlaygroundError, Result};
use crate::pixi::EnvVars;

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve `cmd` on the `PATH` exported by `env`.
pub fn which(cmd: &str, env: &EnvVars) -> Result<String> {
    which_in(cmd, OsStr::new(env.require("PATH")?))
}

/// Resolve `cmd` on an explicit search path.
///
/// A `cmd` containing a directory component is checked as given. The result
/// is lexically normalized.
pub fn which_in(cmd: &str, search_path: &OsStr) -> Result<String> {
    let found = if Path::new(cmd).components().count() > 1 {
        candidates(Path::new(cmd)).into_iter().find(|p| is_runnable(p))
    } else {
        std::env::split_paths(search_path)
            .flat_map(|dir| candidates(&dir.join(cmd)))
            .find(|p| is_runnable(p))
    };

    match found {
        Some(path) => {
            let path = normalize(&path);
            tracing::debug!("Resolved {} to {}", cmd, path.display());
            Ok(path.to_string_lossy().into_owned())
        }
        None => Err(PlaygroundError::ToolNotFound {
            tool: cmd.to_string(),
        }),
    }
}

fn is_runnable(path: &Path) -> bool {
    path.is_file() && is_executable(path)
}

/// Paths to try for `base`: as given, then with each `PATHEXT` suffix on Windows.
fn candidates(base: &Path) -> Vec<PathBuf> {
    let mut out = vec![base.to_path_buf()];
    if cfg!(windows) {
        let pathext =
            std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
        for ext in pathext.split(';').filter(|e| !e.is_empty()) {
            let mut name = base.as_os_str().to_os_string();
            name.push(ext.to_ascii_lowercase());
            out.push(PathBuf::from(name));
        }
    }
    out
}

/// Collapse `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.iter().collect()
    }
}

/// Normalize one path using `platform`'s conventions.
///
/// Windows paths get backslash separators and keep their drive or UNC prefix.
pub fn normalize_for(platform: Platform, path: &str) -> String {
    let (sep, path) = if platform.is_windows() {
        ('\\', path.replace('/', "\\"))
    } else {
        ('/', path.to_string())
    };
    let (prefix, rest) = if platform.is_windows() {
        split_drive(&path)
    } else {
        ("", path.as_str())
    };
    let absolute = rest.starts_with(sep);

    let mut parts: Vec<&str> = Vec::new();
    for part in rest.split(sep) {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let mut out = prefix.to_string();
    if absolute {
        out.push(sep);
    }
    out.push_str(&parts.join(&sep.to_string()));
    if out.is_empty() {
        ".".to_string()
    } else {
        out
    }
}

/// Normalize every entry of a `PATH`-style list.
///
/// Empty entries name the current directory and come out as `.`.
pub fn normalize_list(platform: Platform, list: &str) -> String {
    let sep = platform.path_list_separator();
    list.split(sep)
        .map(|entry| normalize_for(platform, entry))
        .collect::<Vec<_>>()
        .join(&sep.to_string())
}

/// Split a Windows path into its drive (`C:`) or UNC (`\\host\share`) prefix and the rest.
fn split_drive(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        return path.split_at(2);
    }
    if let Some(unc) = path.strip_prefix("\\\\") {
        let mut seps = unc.match_indices('\\').map(|(i, _)| i + 2);
        if let Some(host_end) = seps.next() {
            let share_end = seps.next().unwrap_or(path.len());
            if host_end > 2 && share_end > host_end + 1 {
                return path.split_at(share_end);
            }
        }
    }
    ("", path)
}
