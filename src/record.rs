//! Record definitions
//!
//! The logical entry stored in one block.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WardenError};

/// A stored credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Service the credential belongs to (also its key)
    pub service: String,

    /// Account name at the service
    pub username: String,

    /// The secret itself
    pub secret: String,
}

impl Record {
    /// Create a new record
    pub fn new(
        service: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Serialize to the block payload form
    ///
    /// bincode writes every string with a u64 length prefix, so the payload
    /// is self-delimiting.
    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| WardenError::Serialization(format!("record: {}", e)))
    }

    /// Deserialize a block payload
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes)
            .map_err(|e| WardenError::CorruptRecord(format!("undecodable record: {}", e)))
    }

    /// Size of the encoded form in bytes, without encoding it
    pub fn encoded_len(&self) -> Result<usize> {
        let size = bincode::serialized_size(self)
            .map_err(|e| WardenError::Serialization(format!("record: {}", e)))?;
        usize::try_from(size)
            .map_err(|_| WardenError::Serialization(format!("record: {} bytes", size)))
    }
}
