//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives 256-bit encryption keys from user passwords. The hash, iteration
//! count and output length are constants of the envelope format, so a salt
//! plus password always reproduces the same key.

use std::fmt;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use hmac::Hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{KEY_SIZE, PBKDF2_ITERATIONS, SALT_SIZE};
use crate::error::{EnvsealError, EnvsealResult};

/// A 256-bit encryption key, zeroed when dropped
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Wrap raw key bytes
    pub fn from_bytes(key: [u8; KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Build a key from a slice, e.g. the contents of a key file
    pub fn from_slice(bytes: &[u8]) -> EnvsealResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(EnvsealError::InvalidKey(format!(
                "expected {} key bytes, got {}",
                KEY_SIZE,
                bytes.len()
            )));
        }
        let mut key = Self::zeroed();
        key.key.copy_from_slice(bytes);
        Ok(key)
    }

    /// Generate a random key from the OS RNG
    pub fn generate() -> EnvsealResult<Self> {
        let mut key = Self::zeroed();
        OsRng
            .try_fill_bytes(&mut key.key)
            .map_err(|e| EnvsealError::Encryption(format!("Failed to generate key: {}", e)))?;
        Ok(key)
    }

    /// Key material is only ever written into an owned key, so it is
    /// wiped on drop even when a fill fails part way
    fn zeroed() -> Self {
        Self {
            key: [0u8; KEY_SIZE],
        }
    }

    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Generate a random salt for key derivation
pub fn generate_salt() -> EnvsealResult<[u8; SALT_SIZE]> {
    let mut salt = [0u8; SALT_SIZE];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| EnvsealError::Encryption(format!("Failed to generate salt: {}", e)))?;
    Ok(salt)
}

/// Derive an encryption key from a password and a 16-byte salt
pub fn derive_key(password: &str, salt: &[u8]) -> EnvsealResult<DerivedKey> {
    if salt.len() != SALT_SIZE {
        return Err(EnvsealError::InvalidSalt {
            expected: SALT_SIZE,
            actual: salt.len(),
        });
    }

    let mut key = DerivedKey::zeroed();
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key.key)
        .map_err(|e| EnvsealError::InvalidKey(format!("Key derivation failed: {}", e)))?;

    tracing::debug!(iterations = PBKDF2_ITERATIONS, "derived key from password");

    Ok(key)
}
