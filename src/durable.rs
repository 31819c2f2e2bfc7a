//! Durable file helpers
//!
//! Atomic replace and durable removal shared by the index and block store.
//!
//! A file is never rewritten in place: bytes go to `<path>.tmp`, which is
//! renamed over the canonical path once complete. A crash mid-write can only
//! leave a stray `.tmp` file behind, never a half-written canonical file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::SyncMode;

/// Extension used for in-flight atomic writes
pub(crate) const TEMP_EXTENSION: &str = "tmp";

/// Path of the temp file used while replacing `path`
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    path.with_extension(TEMP_EXTENSION)
}

/// Replace `path` with `bytes` atomically
///
/// Steps:
/// 1. Write everything to `<path>.tmp`
/// 2. fsync the temp file (SyncMode::Full)
/// 3. Rename over `path`
/// 4. fsync the parent directory so the rename itself is durable (SyncMode::Full)
pub(crate) fn write_atomic(path: &Path, bytes: &[u8], sync: SyncMode) -> io::Result<()> {
    let tmp = temp_path(path);

    let result = (|| {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        if sync == SyncMode::Full {
            file.sync_all()?;
        }
        fs::rename(&tmp, path)
    })();

    if let Err(e) = result {
        // Best effort: the canonical file is untouched either way
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    if sync == SyncMode::Full {
        sync_parent(path)?;
    }
    Ok(())
}

/// Remove `path` and make the removal durable
pub(crate) fn remove_durable(path: &Path, sync: SyncMode) -> io::Result<()> {
    fs::remove_file(path)?;
    if sync == SyncMode::Full {
        sync_parent(path)?;
    }
    Ok(())
}

/// Delete leftover `<prefix>*.tmp` files from interrupted writes in `dir`
///
/// Only names starting with `prefix` are touched. Returns the number of
/// files removed.
pub(crate) fn sweep_temp_files(dir: &Path, prefix: &str) -> io::Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_temp = path
            .extension()
            .map(|ext| ext == TEMP_EXTENSION)
            .unwrap_or(false);
        let owned = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(prefix))
            .unwrap_or(false);
        if path.is_file() && is_temp && owned {
            fs::remove_file(&path)?;
            tracing::debug!("Removed stale temp file {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}

/// Delete the leftover temp file of `path`, if an interrupted write left one
///
/// Returns whether a file was removed.
pub(crate) fn remove_stale_temp(path: &Path) -> io::Result<bool> {
    match fs::remove_file(temp_path(path)) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn sync_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => File::open(dir)?.sync_all(),
        _ => Ok(()),
    }
}

// Directories cannot be opened as files here; rename durability is left to the OS
#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> io::Result<()> {
    Ok(())
}
