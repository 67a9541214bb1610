//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the library operations.

pub mod file;
pub mod key;

pub use file::{
    handle_decrypt_command, handle_encrypt_command, handle_verify_command, DecryptArgs,
    EncryptArgs, VerifyArgs,
};
pub use key::{
    handle_generate_key_command, handle_password_key_command, GenerateKeyArgs, PasswordKeyArgs,
};
