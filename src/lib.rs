//! envseal - Authenticated encryption for environment and config files
//!
//! Encrypts small text payloads with AES-256-GCM under a key derived from a
//! password with PBKDF2-HMAC-SHA256, and wraps the result in a JSON envelope
//! carrying two SHA-256 integrity hashes.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `crypto`: Key derivation, the AES-256-GCM codec and hashing
//! - `envelope`: The persisted envelope record and its canonical form
//! - `integrity`: `sha` / `file_sha` attachment and verification
//! - `file_ops`: Whole-file encryption and decryption
//! - `storage`: Atomic file I/O
//! - `config`: Configuration and path management
//! - `cli`: Command handlers for the `envseal` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,no_run
//! use envseal::crypto::{derive_key, generate_salt};
//! use envseal::file_ops::{decrypt_file, encrypt_file};
//!
//! # fn main() -> envseal::EnvsealResult<()> {
//! let salt = generate_salt()?;
//! let key = derive_key("correct horse battery staple", &salt)?;
//!
//! encrypt_file(".env", ".env.enc", &key)?;
//! let warnings = decrypt_file(".env.enc", ".env.restored", &key, true)?;
//! assert!(warnings.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod file_ops;
pub mod integrity;
pub mod storage;

pub use envelope::Envelope;
pub use error::{EnvsealError, EnvsealResult, IntegrityScope};
pub use integrity::IntegrityWarning;
