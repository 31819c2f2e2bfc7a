//! Block codec
//!
//! Lays a payload out into exactly `block_size` bytes and back.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, WardenError};

/// Header size: PayloadLen (4) + PayloadCRC (4) = 8 bytes
pub const HEADER_SIZE: usize = 8;

/// Encode a payload into a full block
///
/// Fails with `CapacityExceeded` if the payload does not fit after the header.
pub fn encode_block(payload: &[u8], block_size: usize) -> Result<BytesMut> {
    let capacity = payload_capacity(block_size)?;
    if payload.len() > capacity {
        return Err(WardenError::CapacityExceeded {
            size: payload.len(),
            capacity,
        });
    }

    let mut block = BytesMut::with_capacity(block_size);
    block.put_u32_le(payload.len() as u32);
    block.put_u32_le(crc32fast::hash(payload));
    block.put_slice(payload);
    block.resize(block_size, 0);

    Ok(block)
}

/// Decode the payload of block `id` from its raw bytes
///
/// The length header is authoritative: trailing zeros inside the payload are
/// preserved, padding after it is ignored.
pub fn decode_block(id: u64, raw: &[u8], block_size: usize) -> Result<Vec<u8>> {
    let capacity = payload_capacity(block_size)?;
    if raw.len() != block_size {
        return Err(WardenError::CorruptRecord(format!(
            "block {} is {} bytes, expected {}",
            id,
            raw.len(),
            block_size
        )));
    }

    let mut buf = raw;
    let len = buf.get_u32_le() as usize;
    let expected_crc = buf.get_u32_le();

    if len > capacity {
        return Err(WardenError::CorruptRecord(format!(
            "block {} declares a {}-byte payload, capacity is {}",
            id, len, capacity
        )));
    }

    let payload = &buf[..len];
    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(WardenError::CorruptRecord(format!(
            "block {} checksum mismatch: expected {:08x}, got {:08x}",
            id, expected_crc, actual_crc
        )));
    }

    Ok(payload.to_vec())
}

/// Payload bytes left in a block of `block_size` after the header
pub fn payload_capacity(block_size: usize) -> Result<usize> {
    match block_size.checked_sub(HEADER_SIZE) {
        Some(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(WardenError::Config(format!(
            "block size {} must be larger than the {}-byte block header",
            block_size, HEADER_SIZE
        ))),
    }
}
