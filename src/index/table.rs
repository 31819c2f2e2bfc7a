//! Index implementation
//!
//! BTreeMap-backed key → block id table, snapshotted to disk on every change.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::SyncMode;
use crate::durable;
use crate::error::{Result, WardenError};

use super::{IndexSnapshot, INDEX_FILENAME};

/// Durable key → block id mapping with monotonic id allocation
pub struct Index {
    /// Path of the index file
    path: PathBuf,

    /// In-memory copy of the persisted state
    state: IndexSnapshot,

    /// Whether snapshots are fsynced
    sync: SyncMode,
}

impl Index {
    /// Load the index from `dir`, or create an empty one
    ///
    /// A temp file left by an interrupted snapshot write is discarded first.
    /// An existing index that cannot be decoded fails with `CorruptIndex`;
    /// there is no partial recovery. A block size that differs from the one
    /// the directory was created with is refused as a `Config` error.
    pub fn load(dir: &Path, block_size: usize, sync: SyncMode) -> Result<Self> {
        let path = dir.join(INDEX_FILENAME);
        let block_size = u32::try_from(block_size).map_err(|_| {
            WardenError::Config(format!("block size {} does not fit in u32", block_size))
        })?;

        if durable::remove_stale_temp(&path)? {
            tracing::warn!("Removed incomplete index write next to {}", path.display());
        }

        let state = match fs::read(&path) {
            Ok(bytes) => {
                let state = IndexSnapshot::decode(&bytes)?;
                if state.block_size != block_size {
                    return Err(WardenError::Config(format!(
                        "data directory uses {}-byte blocks, configured {}",
                        state.block_size, block_size
                    )));
                }
                tracing::debug!(
                    "Loaded index with {} keys, next_id={}",
                    state.entries.len(),
                    state.next_id
                );
                state
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let state = IndexSnapshot::empty(block_size);
                durable::write_atomic(&path, &state.encode()?, sync)?;
                tracing::debug!("Created empty index at {}", path.display());
                state
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, state, sync })
    }

    /// Hand out the next block id
    ///
    /// The incremented counter is persisted before the id is returned, so an
    /// id is never issued twice even across crashes.
    pub fn allocate_id(&mut self) -> Result<u64> {
        let id = self.state.next_id;
        self.state.next_id = id
            .checked_add(1)
            .ok_or_else(|| WardenError::CorruptIndex("block id space exhausted".to_string()))?;

        if let Err(e) = self.persist() {
            self.state.next_id = id;
            return Err(e);
        }

        tracing::trace!("Allocated block id {}", id);
        Ok(id)
    }

    /// Resolve a key to its block id
    pub fn get(&self, key: &str) -> Option<u64> {
        self.state.entries.get(key).copied()
    }

    /// Map `key` to `id` and persist
    pub fn set(&mut self, key: &str, id: u64) -> Result<()> {
        let previous = self.state.entries.insert(key.to_string(), id);

        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.state.entries.insert(key.to_string(), old),
                None => self.state.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Remove `key` and persist, returning its former block id
    pub fn remove(&mut self, key: &str) -> Result<Option<u64>> {
        let Some(id) = self.state.entries.remove(key) else {
            return Ok(None);
        };

        if let Err(e) = self.persist() {
            self.state.entries.insert(key.to_string(), id);
            return Err(e);
        }
        Ok(Some(id))
    }

    /// All live keys, in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.state.entries.keys().cloned().collect()
    }

    /// Iterate over `(key, block id)` pairs in key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.state.entries.iter().map(|(k, &id)| (k.as_str(), id))
    }

    /// Number of live keys
    pub fn len(&self) -> usize {
        self.state.entries.len()
    }

    /// Check if the index has no keys
    pub fn is_empty(&self) -> bool {
        self.state.entries.is_empty()
    }

    /// The id the next `allocate_id` call will return
    pub fn next_id(&self) -> u64 {
        self.state.next_id
    }

    /// Get the index file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full snapshot via atomic replace
    fn persist(&self) -> Result<()> {
        let bytes = self.state.encode()?;
        durable::write_atomic(&self.path, &bytes, self.sync)?;
        Ok(())
    }
}
