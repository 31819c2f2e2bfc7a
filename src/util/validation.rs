//! Input validation
//!
//! Field limits checked before a record reaches the engine.

use crate::error::{Result, WardenError};

/// Maximum length of service and username fields, in characters
pub const MAX_NAME_CHARS: usize = 255;

/// Maximum length of a secret, in bytes
pub const MAX_SECRET_BYTES: usize = 4096;

/// Service names must be non-blank and at most 255 characters
pub fn validate_service(service: &str) -> Result<()> {
    validate_name("service", service)
}

/// Usernames must be non-blank and at most 255 characters
pub fn validate_username(username: &str) -> Result<()> {
    validate_name("username", username)
}

/// Secrets must be non-empty and at most 4096 bytes
///
/// Whitespace is allowed: a secret of spaces is still a secret.
pub fn validate_secret(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(WardenError::InvalidInput("secret must not be empty".to_string()));
    }
    if secret.len() > MAX_SECRET_BYTES {
        return Err(WardenError::InvalidInput(format!(
            "secret is {} bytes, limit is {}",
            secret.len(),
            MAX_SECRET_BYTES
        )));
    }
    Ok(())
}

fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(WardenError::InvalidInput(format!("{} must not be blank", field)));
    }
    let chars = value.chars().count();
    if chars > MAX_NAME_CHARS {
        return Err(WardenError::InvalidInput(format!(
            "{} is {} characters, limit is {}",
            field, chars, MAX_NAME_CHARS
        )));
    }
    Ok(())
}
