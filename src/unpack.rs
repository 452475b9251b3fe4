//! Distribution bundle unpacker.
//!
//! `dist.zip` holds `.tar.xz` members. Members named `*.static.tar.xz` go to
//! the static assets directory as-is; every other `*.tar.xz` member goes to
//! the service root, minus any `etc/config/*.properties` entries so files
//! already configured on disk are never replaced by archived copies.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path};
use std::sync::LazyLock;

use anyhow::Context as _;
use regex::Regex;
use tar::EntryType;
use xz2::read::XzDecoder;

use crate::config::Layout;
use crate::error::{PlaygroundError, Result};

/// Property files never extracted from plain members.
static EXCLUDED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\./)?etc/config/[^/]+\.properties$").expect("Invalid exclusion regex")
});

const STATIC_SUFFIX: &str = ".static.tar.xz";
const TAR_XZ_SUFFIX: &str = ".tar.xz";

/// Kind of zip member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    /// Extracted into the static assets directory, unfiltered.
    Static,
    /// Extracted into the service root, minus configured property files.
    Plain,
}

impl Member {
    /// Classify a zip member by name; `None` for members that are not tarballs.
    pub fn classify(name: &str) -> Option<Self> {
        if name.ends_with(STATIC_SUFFIX) {
            Some(Self::Static)
        } else if name.ends_with(TAR_XZ_SUFFIX) {
            Some(Self::Plain)
        } else {
            None
        }
    }
}

/// Whether a tar entry path is excluded from plain members.
pub fn is_excluded(path: &str) -> bool {
    EXCLUDED.is_match(path)
}

/// Unpack `archive` into the tree described by `layout`.
pub fn unpack(archive: &Path, layout: &Layout) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)
        .with_context(|| format!("Failed to read zip archive {}", archive.display()))?;

    for i in 0..zip.len() {
        let member = zip
            .by_index(i)
            .with_context(|| format!("Failed to read member {i} of {}", archive.display()))?;
        if member.is_dir() {
            continue;
        }
        let name = member.name().to_string();
        let Some(kind) = Member::classify(&name) else {
            tracing::debug!("Skipping {}", name);
            continue;
        };

        let count = match kind {
            Member::Static => {
                let dest = layout.static_dir();
                fs::create_dir_all(&dest)?;
                extract(XzDecoder::new(member), &dest, false)?
            }
            Member::Plain => {
                fs::create_dir_all(layout.root())?;
                extract(XzDecoder::new(member), layout.root(), true)?
            }
        };
        tracing::info!("Extracted {} entries from {}", count, name);
    }
    Ok(())
}

/// Extract a tar stream into `dest`, returning the number of entries written.
pub fn extract<R: Read>(reader: R, dest: &Path, exclude_properties: bool) -> Result<usize> {
    let mut archive = tar::Archive::new(reader);
    let mut count = 0;
    for entry in archive.entries()? {
        let mut entry = entry?;
        let raw = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        check_entry(&entry, &raw)?;

        if exclude_properties && is_excluded(&raw) {
            tracing::debug!("Excluding {}", raw);
            continue;
        }
        if entry.unpack_in(dest)? {
            count += 1;
        }
    }
    Ok(count)
}

fn unsafe_entry(path: &str, reason: &str) -> PlaygroundError {
    PlaygroundError::UnsafeArchiveEntry {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

/// Reject entries that could write outside the destination or create
/// special files.
fn check_entry<R: Read>(entry: &tar::Entry<'_, R>, raw: &str) -> Result<()> {
    let kind = entry.header().entry_type();
    if matches!(kind, EntryType::Char | EntryType::Block | EntryType::Fifo) {
        return Err(unsafe_entry(raw, "special file"));
    }

    let path = entry.path()?;
    let depth =
        relative_depth(&path, 0).ok_or_else(|| unsafe_entry(raw, "path escapes destination"))?;

    if matches!(kind, EntryType::Symlink | EntryType::Link) {
        let target = entry
            .link_name()?
            .ok_or_else(|| unsafe_entry(raw, "link without target"))?;
        // Symlinks resolve from their own directory, hard links from the root.
        let base = match kind {
            EntryType::Symlink => depth.saturating_sub(1),
            _ => 0,
        };
        if relative_depth(&target, base).is_none() {
            return Err(unsafe_entry(raw, "link target escapes destination"));
        }
    }
    Ok(())
}

/// Depth of `path` below a directory `base` levels deep, or `None` if it is
/// absolute or climbs above the root.
fn relative_depth(path: &Path, base: usize) -> Option<usize> {
    let mut depth = base;
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return None,
            Component::CurDir => {}
            Component::ParentDir => depth = depth.checked_sub(1)?,
            Component::Normal(_) => depth += 1,
        }
    }
    Some(depth)
}
