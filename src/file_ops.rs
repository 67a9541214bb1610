//! Whole-file encryption and decryption
//!
//! Every failure inside one of these operations, whether I/O, parsing,
//! cryptographic or integrity, is reported as a single
//! [`EnvsealError::FileEncryption`] or [`EnvsealError::FileDecryption`]
//! wrapping the original error.

use std::path::Path;

use crate::crypto::DerivedKey;
use crate::error::{EnvsealError, EnvsealResult};
use crate::integrity::{self, IntegrityWarning};
use crate::storage::file_io;

/// Encrypt a text file into an envelope file
pub fn encrypt_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    key: &DerivedKey,
) -> EnvsealResult<()> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let run = || -> EnvsealResult<()> {
        let plaintext = file_io::read_text(input)?;
        let envelope = integrity::encrypt_sealed(&plaintext, key)?;
        file_io::write_envelope(output, &envelope)
    };

    run().map_err(|e| EnvsealError::file_encryption(input, e))?;
    tracing::info!(input = %input.display(), output = %output.display(), "encrypted file");
    Ok(())
}

/// Decrypt an envelope file, verify it, and write the plaintext
///
/// Nothing is written to `output` unless every check passes. Skipped checks
/// are returned so the caller can report them.
pub fn decrypt_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    key: &DerivedKey,
    validate_integrity: bool,
) -> EnvsealResult<Vec<IntegrityWarning>> {
    let (input, output) = (input.as_ref(), output.as_ref());

    let run = || -> EnvsealResult<Vec<IntegrityWarning>> {
        let envelope = file_io::read_envelope(input)?;
        let opened = integrity::open(&envelope, key, validate_integrity)?;
        file_io::write_atomic(output, opened.plaintext.as_bytes())?;
        Ok(opened.warnings)
    };

    let warnings = run().map_err(|e| EnvsealError::file_decryption(input, e))?;
    tracing::info!(input = %input.display(), output = %output.display(), "decrypted file");
    Ok(warnings)
}

/// Run the full decryption pipeline on a file without writing the plaintext
pub fn verify_file(
    input: impl AsRef<Path>,
    key: &DerivedKey,
) -> EnvsealResult<Vec<IntegrityWarning>> {
    let input = input.as_ref();

    let run = || -> EnvsealResult<Vec<IntegrityWarning>> {
        let envelope = file_io::read_envelope(input)?;
        Ok(integrity::open(&envelope, key, true)?.warnings)
    };

    run().map_err(|e| EnvsealError::file_decryption(input, e))
}
