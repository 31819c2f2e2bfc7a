//! Error types for Warden
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using WardenError
pub type Result<T> = std::result::Result<T, WardenError>;

/// Unified error type for Warden operations
#[derive(Debug, Error)]
pub enum WardenError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("Key already exists: {0}")]
    DuplicateKey(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    // -------------------------------------------------------------------------
    // Block Errors
    // -------------------------------------------------------------------------
    #[error("Payload of {size} bytes exceeds block capacity of {capacity} bytes")]
    CapacityExceeded { size: usize, capacity: usize },

    #[error("Block not found: {0}")]
    BlockNotFound(u64),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    // -------------------------------------------------------------------------
    // Index Errors
    // -------------------------------------------------------------------------
    #[error("Corrupt index: {0}")]
    CorruptIndex(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WardenError {
    /// Whether the caller can carry on using the engine after this error.
    ///
    /// Only a corrupt index is fatal: the engine refuses to open at all.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, WardenError::CorruptIndex(_))
    }
}
