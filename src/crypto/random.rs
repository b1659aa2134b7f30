use crate::error::Result;
use rand::RngCore;
use rand::rngs::OsRng;
use base64::{Engine as _, engine::general_purpose};

/// The size of the index page script nonce in characters.
const SCRIPT_NONCE_SIZE: usize = 32;

/// Generates a cryptographically secure random array of bytes.
///
/// # Arguments
///
/// * `length` - The number of bytes to generate.
///
/// # Returns
///
/// A `Result` containing the random bytes.
pub fn random_bytes(length: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// Generates a cryptographically secure random string.
///
/// The returned string is encoded as URL-safe base64 without padding, which
/// makes it safe to use in URLs, cookie values, and file names.
///
/// # Arguments
///
/// * `length` - The exact length of the returned string in characters.
///
/// # Returns
///
/// A `Result` containing the random string.
pub fn random_string(length: usize) -> Result<String> {
    // each byte (8 bits) gives us 4/3 base64 (6 bits) characters,
    // we account for that conversion and add one to handle truncation
    let b64_size = length * 3 / 4 + 1;
    let random = random_bytes(b64_size)?;

    // trim back down to the requested size since we added one above
    let mut encoded = general_purpose::URL_SAFE_NO_PAD.encode(random);
    encoded.truncate(length);

    Ok(encoded)
}

/// Generates a new random script nonce for the index page CSP directives.
///
/// # Returns
///
/// A URL-safe base64-encoded nonce.
pub fn generate_script_nonce() -> Result<String> {
    random_string(SCRIPT_NONCE_SIZE)
}
