//! Storage Module
//!
//! Fixed-size block persistence keyed by block id.
//!
//! ## Responsibilities
//! - Persist opaque payloads in fixed-size block files
//! - Recover payloads through an explicit length header (never by trimming padding)
//! - Detect torn or damaged blocks via CRC32
//! - Name block files bijectively from their id
//!
//! ## Block Format
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │ Header (8 bytes)                                       │
//! │   PayloadLen: u32 LE (4) | PayloadCRC: u32 LE (4)      │
//! ├────────────────────────────────────────────────────────┤
//! │ Payload (PayloadLen bytes)                             │
//! ├────────────────────────────────────────────────────────┤
//! │ Zero padding up to block_size                          │
//! └────────────────────────────────────────────────────────┘
//! ```

mod block;
mod store;

pub use block::{decode_block, encode_block, payload_capacity, HEADER_SIZE};
pub use store::BlockStore;
