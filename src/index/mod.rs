//! Index Module
//!
//! Durable mapping from logical key to block id.
//!
//! ## Responsibilities
//! - Resolve keys to block ids
//! - Allocate block ids from a monotonic, persisted counter
//! - Persist the whole mapping after every mutation (atomic replace)
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Header (10 bytes)                                        │
//! │   Magic: "WIDX" (4) | Version: u16 (2) | BodyCRC: u32 (4)│
//! ├──────────────────────────────────────────────────────────┤
//! │ Body: bincode(IndexSnapshot)                             │
//! │   block_size: u32 | next_id: u64 | entries: key → id     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! `next_id` is never derived from the number of live keys: ids freed by a
//! delete are never handed out again.

mod snapshot;
mod table;

pub use snapshot::IndexSnapshot;
pub use table::Index;

// =============================================================================
// Shared Constants
// =============================================================================

/// Name of the index file inside the data directory
pub const INDEX_FILENAME: &str = "index";

/// Magic bytes identifying a Warden index file
pub(crate) const MAGIC: &[u8; 4] = b"WIDX";

/// Current index format version
pub(crate) const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + BodyCRC (4) = 10 bytes
pub(crate) const HEADER_SIZE: usize = 10;
