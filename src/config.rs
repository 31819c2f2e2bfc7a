//! Configuration for Warden
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, WardenError};
use crate::storage::HEADER_SIZE;

/// Default block size in bytes
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Main configuration for a Warden store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── index            (key → block id snapshot)
    ///     └── blocks/          (one file per block id)
    pub data_dir: PathBuf,

    /// Size of every block file on disk (header + payload + padding)
    pub block_size: usize,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Whether atomic replaces are fsynced
    pub sync_mode: SyncMode,
}

/// Durability of index and block writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// fsync the temp file before rename and the directory after (survives power loss)
    Full,

    /// Rename only; a crash never exposes a half-written file, but the
    /// last writes may be lost on power failure
    None,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./warden_data"),
            block_size: DEFAULT_BLOCK_SIZE,
            sync_mode: SyncMode::Full,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config is usable before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.block_size <= HEADER_SIZE {
            return Err(WardenError::Config(format!(
                "block size {} must be larger than the {}-byte block header",
                self.block_size, HEADER_SIZE
            )));
        }
        if self.block_size > u32::MAX as usize {
            return Err(WardenError::Config(format!(
                "block size {} does not fit the u32 length header",
                self.block_size
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all storage)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the block size (in bytes)
    pub fn block_size(mut self, size: usize) -> Self {
        self.config.block_size = size;
        self
    }

    /// Set the sync mode
    pub fn sync_mode(mut self, mode: SyncMode) -> Self {
        self.config.sync_mode = mode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
