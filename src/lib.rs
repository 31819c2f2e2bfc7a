//! # Warden
//!
//! A small local credential vault with:
//! - A durable key → block id index with a monotonic id counter
//! - Fixed-size, length-prefixed, checksummed block files
//! - Atomic-replace writes for both index and blocks
//! - A pluggable payload cipher boundary (plaintext only)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CLI / Interactive Shell                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Command Handler                            │
//! │              (validation, dispatch)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Engine                                 │
//! │        (create / read / update / delete / list)              │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │                                  │
//!            ▼                                  ▼
//!   ┌─────────────────┐                ┌─────────────────┐
//!   │      Index      │                │  PayloadCipher  │
//!   │ (key → block id)│                │   (plaintext)   │
//!   └─────────────────┘                └────────┬────────┘
//!                                               │
//!                                               ▼
//!                                      ┌─────────────────┐
//!                                      │   BlockStore    │
//!                                      │ (fixed blocks)  │
//!                                      └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

mod durable;
pub mod storage;
pub mod index;
pub mod record;
pub mod crypto;
pub mod engine;
pub mod command;
pub mod util;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, WardenError};
pub use config::{Config, SyncMode};
pub use engine::{ConsistencyReport, Engine, SharedEngine};
pub use record::Record;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Warden
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
