//! SHA-256 digests for integrity checks

use sha2::{Digest, Sha256};

/// SHA-256 of the UTF-8 bytes of `text`, as lowercase hex
///
/// Both sides of every integrity comparison go through this function.
pub fn compute_sha256(text: &str) -> String {
    compute_sha256_bytes(text.as_bytes())
}

/// SHA-256 of raw bytes, as lowercase hex
pub fn compute_sha256_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
