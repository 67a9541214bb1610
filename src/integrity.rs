//! Two-level integrity checks around the AEAD envelope
//!
//! `sha` covers the plaintext and `file_sha` covers the serialized envelope
//! (every field except `file_sha` itself). On encryption `sha` is attached
//! first so that `file_sha` covers it. On decryption `file_sha` is checked
//! before any decryption work, and `sha` is checked again on the decrypted
//! text before it is released.
//!
//! A missing hash is not an error. The check is skipped and reported as an
//! [`IntegrityWarning`] so envelopes without integrity metadata stay readable.

use std::fmt;

use crate::crypto::{self, compute_sha256, DerivedKey};
use crate::envelope::Envelope;
use crate::error::{EnvsealError, EnvsealResult, IntegrityScope};

/// A skipped integrity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// `file_sha` missing, encrypted file check skipped
    EnvelopeHashMissing,
    /// `sha` missing, plaintext check skipped
    PlaintextHashMissing,
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvelopeHashMissing => {
                write!(f, "file_sha missing. Encrypted file integrity check skipped.")
            }
            Self::PlaintextHashMissing => {
                write!(f, "sha missing. Plaintext integrity check skipped.")
            }
        }
    }
}

/// Plaintext released by [`open`], with any checks that were skipped
#[derive(Debug)]
pub struct Opened {
    pub plaintext: String,
    pub warnings: Vec<IntegrityWarning>,
}

/// Attach `sha` and then `file_sha` to a freshly encrypted envelope
pub fn seal(mut envelope: Envelope, plaintext: &str) -> EnvsealResult<Envelope> {
    envelope.sha = Some(compute_sha256(plaintext));
    envelope.file_sha = None;

    let file_sha = compute_sha256(&envelope.canonical_json()?);
    tracing::debug!(%file_sha, "computed encrypted file hash");
    envelope.file_sha = Some(file_sha);

    Ok(envelope)
}

/// Check `file_sha` against the envelope's other fields
pub fn verify_envelope(envelope: &Envelope) -> EnvsealResult<Option<IntegrityWarning>> {
    let Some(expected) = &envelope.file_sha else {
        let warning = IntegrityWarning::EnvelopeHashMissing;
        tracing::warn!("{}", warning);
        return Ok(Some(warning));
    };

    let actual = compute_sha256(&envelope.canonical_json()?);
    if *expected != actual {
        return Err(EnvsealError::IntegrityCheckFailed {
            scope: IntegrityScope::Envelope,
            expected: expected.clone(),
            actual,
        });
    }

    Ok(None)
}

/// Check `sha` against decrypted text
pub fn verify_plaintext(
    envelope: &Envelope,
    plaintext: &str,
) -> EnvsealResult<Option<IntegrityWarning>> {
    match &envelope.sha {
        Some(expected) => {
            check_plaintext_hash(expected, plaintext)?;
            Ok(None)
        }
        None => {
            let warning = IntegrityWarning::PlaintextHashMissing;
            tracing::warn!("{}", warning);
            Ok(Some(warning))
        }
    }
}

pub(crate) fn check_plaintext_hash(expected: &str, plaintext: &str) -> EnvsealResult<()> {
    let actual = compute_sha256(plaintext);
    if expected != actual {
        return Err(EnvsealError::IntegrityCheckFailed {
            scope: IntegrityScope::Plaintext,
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}

/// Encrypt plaintext and attach both integrity hashes
pub fn encrypt_sealed(plaintext: &str, key: &DerivedKey) -> EnvsealResult<Envelope> {
    let envelope = crypto::encrypt(plaintext, key)?;
    seal(envelope, plaintext)
}

/// Verify and decrypt an envelope
///
/// With `validate_integrity` set, `file_sha` is checked before decryption is
/// attempted and `sha` is checked on the result. Without it, only the AEAD
/// tag protects the payload.
pub fn open(
    envelope: &Envelope,
    key: &DerivedKey,
    validate_integrity: bool,
) -> EnvsealResult<Opened> {
    let mut warnings = Vec::new();

    if validate_integrity {
        warnings.extend(verify_envelope(envelope)?);
    }

    let plaintext = crypto::decrypt(envelope, key, validate_integrity)?;

    if validate_integrity {
        warnings.extend(verify_plaintext(envelope, &plaintext)?);
    }

    Ok(Opened {
        plaintext,
        warnings,
    })
}
