// src/state/signature.rs

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use blake3::Hasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::model::{InputConfig, InputKind};
use crate::errors::InputReadError;

/// Deterministic fingerprint of an input's content state, as a hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Signature {
    fn from(s: String) -> Self {
        Signature(s)
    }
}

/// A named logical input resolved against the project root.
#[derive(Debug, Clone)]
pub struct TrackedInput {
    pub name: String,
    pub path: PathBuf,
    pub kind: InputKind,
    pub recursive: bool,
}

impl TrackedInput {
    /// Resolve an `[input.<name>]` config entry against the project root.
    pub fn from_config(name: &str, cfg: &InputConfig, root: &Path) -> Self {
        Self {
            name: name.to_string(),
            path: root.join(&cfg.path),
            kind: cfg.kind,
            recursive: cfg.recursive,
        }
    }

    /// Compute the input's current signature.
    ///
    /// `NotFound` means the file or directory does not exist; any other error
    /// is a genuine read failure the caller decides how to recover from.
    pub fn signature(&self) -> Result<Signature, InputReadError> {
        match self.kind {
            InputKind::File => file_signature(&self.path),
            InputKind::Dir => dir_signature(&self.path, self.recursive),
        }
    }
}

/// Hash a file's bytes.
pub fn file_signature(path: &Path) -> Result<Signature, InputReadError> {
    let mut file = File::open(path).map_err(|e| read_error(path, e))?;
    let mut hasher = Hasher::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(|e| read_error(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let sig = Signature(hasher.finalize().to_hex().to_string());
    debug!(path = ?path, sig = %sig, "hashed file input");
    Ok(sig)
}

/// Digest a directory's file entries as sorted `name:mtime_ms:size` lines.
///
/// Non-recursive by default: only immediate file entries participate, so a
/// change inside a nested subdirectory goes undetected unless `recursive` is
/// set. With `recursive`, entry names are paths relative to `path`, so a file
/// moving between subdirectories also changes the signature.
pub fn dir_signature(path: &Path, recursive: bool) -> Result<Signature, InputReadError> {
    let mut lines = Vec::new();
    collect_dir_entries(path, path, recursive, &mut lines)?;
    lines.sort();

    let mut hasher = Hasher::new();
    hasher.update(lines.join("|").as_bytes());

    let sig = Signature(hasher.finalize().to_hex().to_string());
    debug!(path = ?path, entries = lines.len(), sig = %sig, "signed directory input");
    Ok(sig)
}

fn collect_dir_entries(
    root: &Path,
    dir: &Path,
    recursive: bool,
    lines: &mut Vec<String>,
) -> Result<(), InputReadError> {
    let entries = fs::read_dir(dir).map_err(|e| read_error(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| read_error(dir, e))?;
        let entry_path = entry.path();
        let meta = entry.metadata().map_err(|e| read_error(&entry_path, e))?;

        if meta.is_dir() {
            if recursive {
                collect_dir_entries(root, &entry_path, recursive, lines)?;
            }
            continue;
        }
        if !meta.is_file() {
            continue;
        }

        let name = entry_path
            .strip_prefix(root)
            .unwrap_or(&entry_path)
            .to_string_lossy()
            .replace('\\', "/");

        let mtime_ms = meta
            .modified()
            .map_err(|e| read_error(&entry_path, e))?
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        lines.push(format!("{}:{}:{}", name, mtime_ms, meta.len()));
    }

    Ok(())
}

fn read_error(path: &Path, source: io::Error) -> InputReadError {
    if source.kind() == io::ErrorKind::NotFound {
        InputReadError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        InputReadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
