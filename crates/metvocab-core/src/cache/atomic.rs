//! Cache entry file I/O.
//!
//! An entry is replaced by writing a sibling temp file in the same host
//! directory, syncing it, and renaming it over the entry. Readers see either
//! the previous document or the new one.

use crate::error::{Result, VocabError};
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Parse the entry at `path`. A missing entry is `None`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(VocabError::io_with_path(e, path)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| VocabError::Json {
            message: format!("Cache entry {} is not valid JSON: {}", path.display(), e),
            source: Some(e),
        })
}

/// Replace the entry at `path` with `data`, creating the host and segment
/// directories on first use.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| VocabError::Io {
            message: format!("Cache entry {} has no parent directory", path.display()),
            path: Some(path.to_path_buf()),
            source: None,
        })?;
    fs::create_dir_all(dir).map_err(|e| VocabError::io_with_path(e, dir))?;

    let body = serde_json::to_vec_pretty(data)?;

    // Dropping the temp file on an early return removes it.
    let mut staged = tempfile::Builder::new()
        .prefix(".entry-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| VocabError::io_with_path(e, dir))?;
    stage(&mut staged, &body).map_err(|e| VocabError::io_with_path(e, staged.path()))?;
    staged
        .persist(path)
        .map_err(|e| VocabError::io_with_path(e.error, path))?;

    debug!("Stored cache entry {}", path.display());
    Ok(())
}

fn stage(file: &mut NamedTempFile, body: &[u8]) -> std::io::Result<()> {
    file.write_all(body)?;
    file.as_file().sync_all()
}
