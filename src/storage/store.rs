//! Block Store
//!
//! Owns the block files of a data directory.
//!
//! ## Responsibilities
//! - Write payloads into fixed-size block files via atomic replace
//! - Read payloads back through the block header
//! - Remove block files durably
//! - Enumerate block files on disk (for consistency scans)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::SyncMode;
use crate::durable;
use crate::error::{Result, WardenError};

use super::{decode_block, encode_block, payload_capacity, HEADER_SIZE};

/// Persists fixed-size blocks under integer ids
///
/// Knows nothing about keys: the id → file mapping is purely
/// `block_{id}.dat`, so a record keeps its file for as long as it keeps its id.
pub struct BlockStore {
    /// Directory holding the block files
    dir: PathBuf,

    /// Size of every block file in bytes
    block_size: usize,

    /// Whether writes and removals are fsynced
    sync: SyncMode,
}

impl BlockStore {
    const FILE_PREFIX: &'static str = "block_";

    /// Open or create a block store in the given directory
    ///
    /// On startup:
    /// 1. Reject block sizes that leave no room after the header
    /// 2. Create directory if it doesn't exist
    /// 3. Remove block temp files left by interrupted writes
    pub fn open(path: &Path, block_size: usize, sync: SyncMode) -> Result<Self> {
        payload_capacity(block_size)?;

        fs::create_dir_all(path)?;

        let swept = durable::sweep_temp_files(path, Self::FILE_PREFIX)?;
        if swept > 0 {
            tracing::warn!(
                "Removed {} incomplete block write(s) from {}",
                swept,
                path.display()
            );
        }

        Ok(Self {
            dir: path.to_path_buf(),
            block_size,
            sync,
        })
    }

    /// Largest payload a single block can hold
    pub fn capacity(&self) -> usize {
        self.block_size - HEADER_SIZE
    }

    /// Write `payload` to block `id`, replacing any existing block
    ///
    /// The capacity check happens before the filesystem is touched, so an
    /// oversized payload leaves no file behind.
    pub fn write(&mut self, id: u64, payload: &[u8]) -> Result<()> {
        let block = encode_block(payload, self.block_size)?;
        durable::write_atomic(&self.block_path(id), &block, self.sync)?;

        tracing::debug!("Wrote block {} ({} payload bytes)", id, payload.len());
        Ok(())
    }

    /// Read the payload of block `id`
    pub fn read(&self, id: u64) -> Result<Vec<u8>> {
        let raw = match fs::read(self.block_path(id)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(WardenError::BlockNotFound(id));
            }
            Err(e) => return Err(e.into()),
        };

        decode_block(id, &raw, self.block_size)
    }

    /// Remove block `id`
    pub fn delete(&mut self, id: u64) -> Result<()> {
        match durable::remove_durable(&self.block_path(id), self.sync) {
            Ok(()) => {
                tracing::debug!("Deleted block {}", id);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(WardenError::BlockNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Check whether a block file exists for `id`
    pub fn contains(&self, id: u64) -> bool {
        self.block_path(id).is_file()
    }

    /// All block ids present on disk, ascending
    pub fn block_ids(&self) -> Result<Vec<u64>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let file_path = entry.path();

            if file_path.is_file() {
                if let Some(id) = Self::parse_block_id(&file_path) {
                    ids.push(id);
                }
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    /// Get the block directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the block size
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Generate the file path for a block with given ID
    pub fn block_path(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}{}.dat", Self::FILE_PREFIX, id))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Parse block ID from filename
    /// "block_42.dat" → Some(42)
    ///
    /// Rejects anything `block_path` would not produce (e.g. "block_042.dat"),
    /// keeping the name ↔ id mapping bijective.
    fn parse_block_id(path: &Path) -> Option<u64> {
        if path.extension()? != "dat" {
            return None;
        }
        let name = path.file_stem()?.to_str()?;
        let id_str = name.strip_prefix(Self::FILE_PREFIX)?;
        let id: u64 = id_str.parse().ok()?;
        (id.to_string() == id_str).then_some(id)
    }
}
