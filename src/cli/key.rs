//! Key generation CLI commands
//!
//! Key files hold the 32 raw key bytes and nothing else.

use std::path::{Path, PathBuf};

use clap::Args;

use super::file::ensure_writable;
use crate::config::{paths::EnvsealPaths, settings::Settings};
use crate::crypto::{derive_key, generate_salt, DerivedKey, SecureString, SALT_SIZE};
use crate::error::{EnvsealError, EnvsealResult};
use crate::storage::file_io;

/// Arguments for `envseal generate-key`
#[derive(Args)]
pub struct GenerateKeyArgs {
    /// Where to write the key (defaults to the configured key file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing key file
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for `envseal generate-key-from-password`
#[derive(Args)]
pub struct PasswordKeyArgs {
    /// Where to write the key (defaults to the configured key file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Salt as 32 hex characters; a random salt is generated when omitted
    #[arg(short, long)]
    pub salt: Option<String>,

    /// Password (prompted for when not given)
    #[arg(long, env = "ENVSEAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Overwrite an existing key file
    #[arg(short, long)]
    pub force: bool,
}

/// Handle `envseal generate-key`
pub fn handle_generate_key_command(
    paths: &EnvsealPaths,
    settings: &Settings,
    args: GenerateKeyArgs,
) -> EnvsealResult<()> {
    let output = settings.key_file(paths, args.output);
    ensure_writable(&output, args.force)?;

    let key = DerivedKey::generate()?;
    write_key(&output, &key)?;

    println!("Key written to {}", output.display());
    Ok(())
}

/// Handle `envseal generate-key-from-password`
pub fn handle_password_key_command(
    paths: &EnvsealPaths,
    settings: &Settings,
    args: PasswordKeyArgs,
) -> EnvsealResult<()> {
    let output = settings.key_file(paths, args.output);
    ensure_writable(&output, args.force)?;

    let salt = match args.salt {
        Some(hex_salt) => hex::decode(hex_salt.trim())
            .map_err(|e| EnvsealError::Config(format!("Salt is not valid hex: {}", e)))?,
        None => generate_salt()?.to_vec(),
    };
    if salt.len() != SALT_SIZE {
        return Err(EnvsealError::InvalidSalt {
            expected: SALT_SIZE,
            actual: salt.len(),
        });
    }

    let password = match args.password {
        Some(password) => {
            let password = SecureString::new(password);
            if password.is_empty() {
                return Err(EnvsealError::Config("Password must not be empty".into()));
            }
            password
        }
        None => prompt_new_password()?,
    };

    println!("Deriving encryption key...");
    let key = derive_key(&password, &salt)?;
    write_key(&output, &key)?;

    println!("Key written to {}", output.display());
    println!("Salt: {}", hex::encode(&salt));
    println!("Keep the salt: the same password and salt reproduce this key.");
    Ok(())
}

/// Write a key file; `write_atomic` creates it owner-only
fn write_key(path: &Path, key: &DerivedKey) -> EnvsealResult<()> {
    file_io::write_atomic(path, key.as_bytes())
}

/// Prompt for a new password with confirmation
fn prompt_new_password() -> EnvsealResult<SecureString> {
    loop {
        let pass1 = prompt_password("Enter password: ")?;

        if pass1.is_empty() {
            println!("Password must not be empty. Please try again.");
            continue;
        }

        let pass2 = prompt_password("Confirm password: ")?;

        if pass1 != pass2 {
            println!("Passwords do not match. Please try again.");
            continue;
        }

        return Ok(pass1);
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> EnvsealResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| EnvsealError::Io(format!("Failed to read password: {}", e)))
}
