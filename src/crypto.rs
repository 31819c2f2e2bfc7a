//! Payload cipher boundary
//!
//! Sits between the engine and the block store: payloads are sealed before
//! they are written and opened after they are read. Index and block
//! allocation never see the transform.
//!
//! No encryption scheme is implemented. `Plaintext` passes bytes through
//! unchanged and is what `Engine::open` uses.

use crate::error::Result;

/// Transform applied to serialized records on their way to and from disk
///
/// `open(seal(p))` must return `p`. Sealed output still has to fit in one
/// block; the capacity check is done on the sealed bytes.
pub trait PayloadCipher: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Transform a serialized record before it is written
    fn seal(&self, plaintext: Vec<u8>) -> Result<Vec<u8>>;

    /// Reverse `seal` on bytes read back from a block
    fn open(&self, sealed: Vec<u8>) -> Result<Vec<u8>>;
}

/// Identity transform
#[derive(Debug, Clone, Copy, Default)]
pub struct Plaintext;

impl PayloadCipher for Plaintext {
    fn name(&self) -> &'static str {
        "plaintext"
    }

    fn seal(&self, plaintext: Vec<u8>) -> Result<Vec<u8>> {
        Ok(plaintext)
    }

    fn open(&self, sealed: Vec<u8>) -> Result<Vec<u8>> {
        Ok(sealed)
    }
}
