//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use xz2::write::XzEncoder;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// Build an uncompressed tar with raw entry names (kept byte for byte,
/// including a leading `./`).
pub fn tarball(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.as_old_mut().name[..name.len()].copy_from_slice(name.as_bytes());
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, *data).unwrap();
    }
    builder.into_inner().unwrap()
}

/// Compress with xz.
pub fn xz(data: &[u8]) -> Vec<u8> {
    let mut encoder = XzEncoder::new(Vec::new(), 6);
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Write a zip of `(member name, member bytes)` pairs to `path`.
pub fn write_zip(path: &Path, members: &[(&str, Vec<u8>)]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, data) in members {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

/// A bundle with one plain and one static member, both carrying a
/// `c.local.properties`.
pub fn sample_bundle(path: &Path) {
    let plain = tarball(&[
        ("./etc/config/c.local.properties", &b"archived"[..]),
        ("./etc/config/compiler-explorer.defaults.properties", &b"x=1\n"[..]),
        ("./etc/scripts/numba_wrapper.py", &b"import sys\nmain()\n"[..]),
    ]);
    let statics = tarball(&[("./etc/config/c.local.properties", &b"static"[..])]);
    write_zip(
        path,
        &[
            ("compiler-explorer.tar.xz", xz(&plain)),
            ("compiler-explorer.static.tar.xz", xz(&statics)),
            ("README.md", b"ignored".to_vec()),
        ],
    );
}

/// Every regular file under `root`, keyed by relative path.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let relative = path.strip_prefix(root).unwrap().to_path_buf();
                files.insert(relative, fs::read(&path).unwrap());
            }
        }
    }
    files
}
