//! Utility Module
//!
//! Pure helpers used by the command layer. Neither touches storage.

mod generator;
mod validation;

pub use generator::{generate_secret, DEFAULT_SECRET_LENGTH, MAX_SECRET_LENGTH, MIN_SECRET_LENGTH};
pub use validation::{
    validate_secret, validate_service, validate_username, MAX_NAME_CHARS, MAX_SECRET_BYTES,
};
