//! Storage layer for envseal
//!
//! Whole-file reads and atomic writes for plaintext, envelope and key files.

pub mod file_io;

pub use file_io::{read_envelope, read_text, write_atomic, write_envelope};
