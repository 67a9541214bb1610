//! AES-256-GCM envelope codec
//!
//! Encrypts a text payload into an [`Envelope`] holding the ciphertext,
//! nonce and detached authentication tag as separate base64 fields. Each
//! encryption draws a fresh nonce from the OS RNG.

use aes_gcm::{
    aead::{rand_core::RngCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Nonce, Tag,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use super::{DerivedKey, NONCE_SIZE, TAG_SIZE};
use crate::envelope::Envelope;
use crate::error::{EnvsealError, EnvsealResult};
use crate::integrity;

/// Encrypt plaintext using AES-256-GCM
///
/// The returned envelope carries no integrity hashes; see
/// [`integrity::seal`] for attaching them.
pub fn encrypt(plaintext: &str, key: &DerivedKey) -> EnvsealResult<Envelope> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|e| EnvsealError::Encryption(format!("Failed to generate nonce: {}", e)))?;

    encrypt_with_nonce(plaintext, key, &nonce_bytes)
}

/// Encrypt with a caller-supplied nonce
///
/// The nonce must never repeat under the same key.
pub(crate) fn encrypt_with_nonce(
    plaintext: &str,
    key: &DerivedKey,
    nonce_bytes: &[u8; NONCE_SIZE],
) -> EnvsealResult<Envelope> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| EnvsealError::Encryption(format!("Failed to create cipher: {}", e)))?;
    let nonce = Nonce::from_slice(nonce_bytes);

    let mut buffer = plaintext.as_bytes().to_vec();
    let tag = cipher
        .encrypt_in_place_detached(nonce, b"", &mut buffer)
        .map_err(|e| EnvsealError::Encryption(format!("Encryption failed: {}", e)))?;

    Ok(Envelope::new(
        STANDARD.encode(&buffer),
        STANDARD.encode(nonce_bytes),
        STANDARD.encode(tag),
    ))
}

/// Decrypt an envelope using AES-256-GCM
///
/// Authentication failures (wrong key, modified ciphertext, nonce or tag)
/// always surface as [`EnvsealError::Decryption`]. When `validate_integrity`
/// is set and the envelope carries a `sha`, the plaintext hash is checked
/// after the AEAD tag has been verified.
pub fn decrypt(
    envelope: &Envelope,
    key: &DerivedKey,
    validate_integrity: bool,
) -> EnvsealResult<String> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| EnvsealError::decryption(format!("Failed to create cipher: {}", e)))?;

    let nonce_bytes = decode_field("nonce", &envelope.nonce)?;
    if nonce_bytes.len() != NONCE_SIZE {
        return Err(EnvsealError::decryption(format!(
            "Invalid nonce size: expected {}, got {}",
            NONCE_SIZE,
            nonce_bytes.len()
        )));
    }

    let tag_bytes = decode_field("tag", &envelope.tag)?;
    if tag_bytes.len() != TAG_SIZE {
        return Err(EnvsealError::decryption(format!(
            "Invalid tag size: expected {}, got {}",
            TAG_SIZE,
            tag_bytes.len()
        )));
    }

    let mut buffer = decode_field("ciphertext", &envelope.ciphertext)?;

    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&nonce_bytes),
            b"",
            &mut buffer,
            Tag::from_slice(&tag_bytes),
        )
        .map_err(|_| {
            EnvsealError::decryption("Authentication failed: invalid key or corrupted data")
        })?;

    let plaintext = String::from_utf8(buffer)
        .map_err(|e| EnvsealError::decryption(format!("Invalid UTF-8 in decrypted data: {}", e)))?;

    if validate_integrity {
        if let Some(expected) = &envelope.sha {
            integrity::check_plaintext_hash(expected, &plaintext)
                .map_err(EnvsealError::decryption_caused_by)?;
        }
    }

    Ok(plaintext)
}

fn decode_field(name: &str, value: &str) -> EnvsealResult<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| EnvsealError::decryption(format!("Invalid {} encoding: {}", name, e)))
}
