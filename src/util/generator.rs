//! Secret generation

use rand::Rng;

use crate::error::{Result, WardenError};

/// Length used when none is given
pub const DEFAULT_SECRET_LENGTH: usize = 16;

/// Shortest secret the generator will produce
pub const MIN_SECRET_LENGTH: usize = 8;

/// Longest secret the generator will produce
pub const MAX_SECRET_LENGTH: usize = 128;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
0123456789\
!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Generate a random secret of `length` characters
///
/// Each character is drawn uniformly from letters, digits and punctuation
/// using the thread-local CSPRNG.
pub fn generate_secret(length: usize) -> Result<String> {
    if !(MIN_SECRET_LENGTH..=MAX_SECRET_LENGTH).contains(&length) {
        return Err(WardenError::InvalidInput(format!(
            "secret length must be between {} and {}, got {}",
            MIN_SECRET_LENGTH, MAX_SECRET_LENGTH, length
        )));
    }

    let mut rng = rand::thread_rng();
    let secret = (0..length)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();

    Ok(secret)
}
