//! Custom error types for envseal
//!
//! Every public operation maps its failures onto one of the kinds below.
//! Low-level causes (cipher errors, I/O, JSON) are converted at the boundary
//! of the operation that produced them; whole-file operations box the
//! originating error so callers can still inspect it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two integrity hashes failed to match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityScope {
    /// `sha`: hash of the decrypted plaintext
    Plaintext,
    /// `file_sha`: hash of the serialized envelope
    Envelope,
}

impl fmt::Display for IntegrityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintext => write!(f, "plaintext"),
            Self::Envelope => write!(f, "encrypted file"),
        }
    }
}

/// The main error type for envseal operations
#[derive(Error, Debug)]
pub enum EnvsealError {
    /// Salt passed to key derivation has the wrong length
    #[error("Invalid salt: expected {expected} bytes, got {actual} bytes")]
    InvalidSalt { expected: usize, actual: usize },

    /// Key derivation failed or key material is malformed
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Encryption errors (cipher setup, RNG, serialization of the envelope)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption errors, including AEAD authentication failures
    #[error("Decryption error: {message}")]
    Decryption {
        message: String,
        #[source]
        source: Option<Box<EnvsealError>>,
    },

    /// A stored hash does not match the recomputed one
    #[error("Integrity check failed for {scope}: expected {expected}, computed {actual}")]
    IntegrityCheckFailed {
        scope: IntegrityScope,
        expected: String,
        actual: String,
    },

    /// Any failure while encrypting a whole file
    #[error("Failed to encrypt {}: {source}", .path.display())]
    FileEncryption {
        path: PathBuf,
        #[source]
        source: Box<EnvsealError>,
    },

    /// Any failure while decrypting a whole file
    #[error("Failed to decrypt {}: {source}", .path.display())]
    FileDecryption {
        path: PathBuf,
        #[source]
        source: Box<EnvsealError>,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl EnvsealError {
    /// Create a decryption error with no underlying envseal cause
    pub fn decryption(message: impl Into<String>) -> Self {
        Self::Decryption {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap another envseal error as a decryption failure
    pub fn decryption_caused_by(cause: EnvsealError) -> Self {
        Self::Decryption {
            message: cause.to_string(),
            source: Some(Box::new(cause)),
        }
    }

    pub fn file_encryption(path: impl Into<PathBuf>, cause: EnvsealError) -> Self {
        Self::FileEncryption {
            path: path.into(),
            source: Box::new(cause),
        }
    }

    pub fn file_decryption(path: impl Into<PathBuf>, cause: EnvsealError) -> Self {
        Self::FileDecryption {
            path: path.into(),
            source: Box::new(cause),
        }
    }

    /// Check if this is an integrity failure at the top level
    pub fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::IntegrityCheckFailed { .. })
    }

    /// Find the integrity failure anywhere in the chain of wrapped errors
    ///
    /// Returns the scope of the first `IntegrityCheckFailed` found, looking
    /// through `Decryption`, `FileEncryption` and `FileDecryption` wrappers.
    pub fn integrity_scope(&self) -> Option<IntegrityScope> {
        match self {
            Self::IntegrityCheckFailed { scope, .. } => Some(*scope),
            Self::Decryption {
                source: Some(inner),
                ..
            } => inner.integrity_scope(),
            Self::FileEncryption { source, .. } | Self::FileDecryption { source, .. } => {
                source.integrity_scope()
            }
            _ => None,
        }
    }

    /// The innermost envseal error this one wraps (itself if it wraps nothing)
    pub fn root(&self) -> &EnvsealError {
        match self {
            Self::Decryption {
                source: Some(inner),
                ..
            } => inner.root(),
            Self::FileEncryption { source, .. } | Self::FileDecryption { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for EnvsealError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EnvsealError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for envseal operations
pub type EnvsealResult<T> = Result<T, EnvsealError>;
