//! Cryptographic functions for envseal
//!
//! Provides AES-256-GCM encryption with PBKDF2-HMAC-SHA256 key derivation
//! and the SHA-256 digests used by the integrity layer.
//!
//! The parameters below are fixed by the envelope format. Changing any of
//! them makes existing envelopes and derived keys unreadable.

pub mod encryption;
pub mod hashing;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{decrypt, encrypt};
pub use hashing::compute_sha256;
pub use key_derivation::{derive_key, generate_salt, DerivedKey};
pub use secure_memory::SecureString;

/// Salt length for key derivation in bytes
pub const SALT_SIZE: usize = 16;

/// AES-256 key length in bytes
pub const KEY_SIZE: usize = 32;

/// AES-GCM nonce length in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag length in bytes
pub const TAG_SIZE: usize = 16;

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 100_000;
