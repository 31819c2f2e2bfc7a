//! Index snapshot
//!
//! The persisted state of the index and its on-disk encoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WardenError};

use super::{HEADER_SIZE, MAGIC, VERSION};

/// Everything the index file holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    /// Block size the data directory was created with
    pub block_size: u32,

    /// Next block id to hand out
    pub next_id: u64,

    /// Live keys and their block ids
    pub entries: BTreeMap<String, u64>,
}

impl IndexSnapshot {
    /// An empty index for a fresh data directory
    pub fn empty(block_size: u32) -> Self {
        Self {
            block_size,
            next_id: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Encode to the index file format: header followed by the bincode body
    pub fn encode(&self) -> Result<Vec<u8>> {
        let body = bincode::serialize(self)
            .map_err(|e| WardenError::Serialization(format!("index snapshot: {}", e)))?;

        let mut bytes = Vec::with_capacity(HEADER_SIZE + body.len());
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        bytes.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
        bytes.extend_from_slice(&body);

        Ok(bytes)
    }

    /// Decode an index file
    ///
    /// Any deviation from the expected shape is `CorruptIndex`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(WardenError::CorruptIndex(format!(
                "file is {} bytes, shorter than the {}-byte header",
                bytes.len(),
                HEADER_SIZE
            )));
        }

        if &bytes[0..4] != MAGIC {
            return Err(WardenError::CorruptIndex(format!(
                "invalid magic: expected WIDX, got {:?}",
                &bytes[0..4]
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(WardenError::CorruptIndex(format!(
                "unsupported version: {}",
                version
            )));
        }

        let expected_crc = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        let body = &bytes[HEADER_SIZE..];
        let actual_crc = crc32fast::hash(body);
        if actual_crc != expected_crc {
            return Err(WardenError::CorruptIndex(format!(
                "checksum mismatch: expected {:08x}, got {:08x}",
                expected_crc, actual_crc
            )));
        }

        let snapshot: IndexSnapshot = bincode::deserialize(body)
            .map_err(|e| WardenError::CorruptIndex(format!("undecodable body: {}", e)))?;

        // Every live id must have come from the counter
        if let Some((key, &id)) = snapshot
            .entries
            .iter()
            .find(|(_, id)| **id >= snapshot.next_id)
        {
            return Err(WardenError::CorruptIndex(format!(
                "key {:?} maps to block {} but next_id is {}",
                key, id, snapshot.next_id
            )));
        }

        Ok(snapshot)
    }
}
