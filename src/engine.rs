//! Engine Module
//!
//! The storage engine that composes the index and the block store.
//!
//! ## Responsibilities
//! - Key-level create/read/update/delete/list
//! - Existence semantics (create vs update)
//! - Crash-safe ordering between block files and index entries
//! - Consistency scans over what a crash can leave behind

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::crypto::{PayloadCipher, Plaintext};
use crate::error::{Result, WardenError};
use crate::index::Index;
use crate::record::Record;
use crate::storage::BlockStore;

/// An engine shared between threads
///
/// The whole engine sits behind one lock: an id allocation, the block write
/// and the index commit that follow it must appear atomic to other callers.
pub type SharedEngine = Arc<Mutex<Engine>>;

/// What a consistency scan found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Block files no key points at (a create or delete was interrupted)
    pub orphaned_blocks: Vec<u64>,

    /// Keys whose block file is missing (a delete was interrupted)
    pub dangling_keys: Vec<String>,
}

impl ConsistencyReport {
    /// Check if the scan found nothing to report
    pub fn is_clean(&self) -> bool {
        self.orphaned_blocks.is_empty() && self.dangling_keys.is_empty()
    }
}

/// The main storage engine
///
/// ## Crash Ordering
///
/// - **create**: allocate id → write block → commit index entry.
///   A crash before the commit leaves an orphaned block, never an entry
///   pointing at nothing.
/// - **delete**: remove block → remove index entry.
///   A crash in between leaves a dangling entry. Reads report it as
///   `CorruptRecord`, and deleting the key again completes the removal.
///
/// Both leftovers show up in [`Engine::scan`].
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Key → block id mapping
    index: Index,

    /// Block files
    blocks: BlockStore,

    /// Transform between serialized records and block payloads
    cipher: Box<dyn PayloadCipher>,
}

impl Engine {
    // =========================================================================
    // Internal Path Constants
    // =========================================================================
    const BLOCK_DIR: &'static str = "blocks";

    /// Open or create an engine with the given config
    ///
    /// On startup:
    /// 1. Validate config and create the data directory
    /// 2. Load or create the index (refuses to open if it is corrupt)
    /// 3. Open the block store
    pub fn open(config: Config) -> Result<Self> {
        Self::open_with_cipher(config, Box::new(Plaintext))
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Open with a payload cipher other than `Plaintext`
    pub fn open_with_cipher(config: Config, cipher: Box<dyn PayloadCipher>) -> Result<Self> {
        // Step 1: Validate and create data directory
        config.validate()?;
        fs::create_dir_all(&config.data_dir)?;

        // Step 2: Load index
        let index = Index::load(&config.data_dir, config.block_size, config.sync_mode)?;

        // Step 3: Open block store
        let block_dir = config.data_dir.join(Self::BLOCK_DIR);
        let blocks = BlockStore::open(&block_dir, config.block_size, config.sync_mode)?;

        tracing::info!(
            "Opened store at {} ({} keys, next_id={}, cipher={})",
            config.data_dir.display(),
            index.len(),
            index.next_id(),
            cipher.name()
        );

        Ok(Self {
            config,
            index,
            blocks,
            cipher,
        })
    }

    /// Store a record under a new key
    ///
    /// Steps:
    /// 1. Reject existing keys without touching the block store
    /// 2. Encode and check capacity (before an id is spent)
    /// 3. Allocate a fresh id
    /// 4. Write the block
    /// 5. Commit the index entry
    pub fn create(&mut self, key: &str, record: &Record) -> Result<()> {
        if self.index.get(key).is_some() {
            return Err(WardenError::DuplicateKey(key.to_string()));
        }

        let payload = self.seal(record)?;

        let id = self.index.allocate_id()?;
        self.blocks.write(id, &payload)?;
        self.index.set(key, id)?;

        tracing::debug!("Created key {:?} at block {}", key, id);
        Ok(())
    }

    /// Read the record stored under `key`
    pub fn read(&self, key: &str) -> Result<Record> {
        let id = self.resolve(key)?;

        let payload = match self.blocks.read(id) {
            Ok(payload) => payload,
            Err(WardenError::BlockNotFound(id)) => {
                tracing::warn!("Key {:?} points at missing block {}", key, id);
                return Err(WardenError::CorruptRecord(format!(
                    "key {:?} points at missing block {}",
                    key, id
                )));
            }
            Err(e) => return Err(e),
        };

        let plaintext = self.cipher.open(payload)?;
        Record::decode(&plaintext)
    }

    /// Replace the record stored under `key`, keeping its block id
    pub fn update(&mut self, key: &str, record: &Record) -> Result<()> {
        let id = self.resolve(key)?;

        let payload = self.seal(record)?;
        self.blocks.write(id, &payload)?;

        tracing::debug!("Updated key {:?} at block {}", key, id);
        Ok(())
    }

    /// Remove `key` and its block
    ///
    /// Steps:
    /// 1. Remove the block file
    /// 2. Remove the index entry (the commit point)
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let id = self.resolve(key)?;

        match self.blocks.delete(id) {
            Ok(()) => {}
            Err(WardenError::BlockNotFound(id)) => {
                tracing::warn!(
                    "Block {} for key {:?} already gone, completing interrupted delete",
                    id,
                    key
                );
            }
            Err(e) => return Err(e),
        }

        self.index.remove(key)?;

        tracing::debug!("Deleted key {:?} (block {})", key, id);
        Ok(())
    }

    /// All stored keys, in sorted order
    pub fn list(&self) -> Vec<String> {
        self.index.keys()
    }

    /// Compare the index against the block files on disk
    ///
    /// Read-only: nothing is repaired or reclaimed.
    pub fn scan(&self) -> Result<ConsistencyReport> {
        let on_disk = self.blocks.block_ids()?;

        let mut referenced: Vec<u64> = self.index.entries().map(|(_, id)| id).collect();
        referenced.sort_unstable();

        let orphaned_blocks: Vec<u64> = on_disk
            .iter()
            .copied()
            .filter(|id| referenced.binary_search(id).is_err())
            .collect();

        let dangling_keys: Vec<String> = self
            .index
            .entries()
            .filter(|(_, id)| on_disk.binary_search(id).is_err())
            .map(|(key, _)| key.to_string())
            .collect();

        let report = ConsistencyReport {
            orphaned_blocks,
            dangling_keys,
        };

        if !report.is_clean() {
            tracing::warn!(
                "Consistency scan: {} orphaned block(s), {} dangling key(s)",
                report.orphaned_blocks.len(),
                report.dangling_keys.len()
            );
        }

        Ok(report)
    }

    /// Move the engine behind a lock for use from several threads
    pub fn into_shared(self) -> SharedEngine {
        Arc::new(Mutex::new(self))
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Block id currently backing `key`
    pub fn block_id(&self, key: &str) -> Option<u64> {
        self.index.get(key)
    }

    /// The id the next create will be given
    pub fn next_block_id(&self) -> u64 {
        self.index.next_id()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Largest sealed payload one block can hold
    pub fn payload_capacity(&self) -> usize {
        self.blocks.capacity()
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the block directory path
    pub fn block_dir(&self) -> PathBuf {
        self.blocks.dir().to_path_buf()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn resolve(&self, key: &str) -> Result<u64> {
        self.index
            .get(key)
            .ok_or_else(|| WardenError::KeyNotFound(key.to_string()))
    }

    /// Encode and seal a record, failing early if it cannot fit in a block
    fn seal(&self, record: &Record) -> Result<Vec<u8>> {
        let payload = self.cipher.seal(record.encode()?)?;

        let capacity = self.blocks.capacity();
        if payload.len() > capacity {
            return Err(WardenError::CapacityExceeded {
                size: payload.len(),
                capacity,
            });
        }
        Ok(payload)
    }
}
