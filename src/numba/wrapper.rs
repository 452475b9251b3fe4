//! Patch for Compiler Explorer's `numba_wrapper.py`.
//!
//! The wrapper is run with the interpreter of the environment the service
//! starts in. The patch re-executes it through pixi inside the environment
//! that owns the interpreter, so CUDA and LLVM activation applies.
//!
//! The insertion point is the first line starting with `import sys`. This
//! is a contract with the upstream file format: if the anchor disappears
//! the patch fails instead of guessing.

use std::fs;
use std::path::Path;

use crate::error::{PlaygroundError, Result};

/// Line prefix the patch is inserted after.
pub const ANCHOR: &[u8] = b"import sys";

/// Code block inserted after the anchor line.
pub const PATCH: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/scripts/numba_wrapper_patch.py"
));

/// Insert [`PATCH`] after the anchor line of `source`.
///
/// Returns `None` when no line starts with [`ANCHOR`]. Source that already
/// carries the patch is returned unchanged.
pub fn patch(source: &[u8]) -> Option<Vec<u8>> {
    let mut offset = 0;
    for line in source.split_inclusive(|&b| b == b'\n') {
        offset += line.len();
        if !line.starts_with(ANCHOR) {
            continue;
        }
        if source[offset..].starts_with(PATCH.as_bytes()) {
            return Some(source.to_vec());
        }

        let mut out = Vec::with_capacity(source.len() + PATCH.len() + 1);
        out.extend_from_slice(&source[..offset]);
        if !line.ends_with(b"\n") {
            out.push(b'\n');
        }
        out.extend_from_slice(PATCH.as_bytes());
        out.extend_from_slice(&source[offset..]);
        return Some(out);
    }
    None
}

/// Patch the wrapper at `path` in place.
pub fn patch_file(path: &Path) -> Result<()> {
    let source = fs::read(path)?;
    let patched = patch(&source).ok_or_else(|| PlaygroundError::WrapperAnchorMissing {
        path: path.to_path_buf(),
    })?;
    if patched != source {
        fs::write(path, patched)?;
        tracing::info!("Patched {}", path.display());
    }
    Ok(())
}
