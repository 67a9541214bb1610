//! Encrypt, decrypt and verify CLI commands

use std::path::{Path, PathBuf};

use clap::Args;
use zeroize::Zeroizing;

use crate::config::{paths::EnvsealPaths, settings::Settings};
use crate::crypto::DerivedKey;
use crate::error::{EnvsealError, EnvsealResult};
use crate::file_ops;
use crate::integrity::IntegrityWarning;
use crate::storage::file_io;

/// Arguments for `envseal encrypt`
#[derive(Args)]
pub struct EncryptArgs {
    /// Plaintext file to encrypt
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the encrypted envelope
    #[arg(short, long)]
    pub output: PathBuf,

    /// Key file (32 raw bytes)
    #[arg(short, long)]
    pub key_file: Option<PathBuf>,

    /// Overwrite the output if it exists
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for `envseal decrypt`
#[derive(Args)]
pub struct DecryptArgs {
    /// Encrypted envelope to decrypt
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the plaintext
    #[arg(short, long)]
    pub output: PathBuf,

    /// Key file (32 raw bytes)
    #[arg(short, long)]
    pub key_file: Option<PathBuf>,

    /// Skip the sha and file_sha checks
    #[arg(long)]
    pub skip_sha_validation: bool,

    /// Overwrite the output if it exists
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for `envseal verify`
#[derive(Args)]
pub struct VerifyArgs {
    /// Encrypted envelope to verify
    #[arg(short, long)]
    pub input: PathBuf,

    /// Key file (32 raw bytes)
    #[arg(short, long)]
    pub key_file: Option<PathBuf>,
}

/// Handle `envseal encrypt`
pub fn handle_encrypt_command(
    paths: &EnvsealPaths,
    settings: &Settings,
    args: EncryptArgs,
) -> EnvsealResult<()> {
    ensure_writable(&args.output, args.force || settings.overwrite_outputs)?;
    let key = load_key(&settings.key_file(paths, args.key_file))?;

    file_ops::encrypt_file(&args.input, &args.output, &key)?;

    println!(
        "Encrypted {} -> {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

/// Handle `envseal decrypt`
pub fn handle_decrypt_command(
    paths: &EnvsealPaths,
    settings: &Settings,
    args: DecryptArgs,
) -> EnvsealResult<()> {
    ensure_writable(&args.output, args.force || settings.overwrite_outputs)?;
    let key = load_key(&settings.key_file(paths, args.key_file))?;
    let validate = settings.validate_integrity && !args.skip_sha_validation;

    if !validate {
        eprintln!("Warning: integrity checks disabled, relying on the authentication tag only.");
    }

    let warnings = file_ops::decrypt_file(&args.input, &args.output, &key, validate)?;
    print_warnings(&warnings);

    println!(
        "Decrypted {} -> {}",
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

/// Handle `envseal verify`
pub fn handle_verify_command(
    paths: &EnvsealPaths,
    settings: &Settings,
    args: VerifyArgs,
) -> EnvsealResult<()> {
    let key = load_key(&settings.key_file(paths, args.key_file))?;

    let warnings = file_ops::verify_file(&args.input, &key)?;
    print_warnings(&warnings);

    println!("{}: OK", args.input.display());
    Ok(())
}

/// Read a raw 32-byte key file
pub fn load_key(path: &Path) -> EnvsealResult<DerivedKey> {
    let bytes = Zeroizing::new(file_io::read_bytes(path)?);
    DerivedKey::from_slice(&bytes)
        .map_err(|e| EnvsealError::InvalidKey(format!("{}: {}", path.display(), e)))
}

/// Refuse to clobber an existing file unless overwriting is allowed
pub(crate) fn ensure_writable(path: &Path, overwrite: bool) -> EnvsealResult<()> {
    if path.exists() && !overwrite {
        return Err(EnvsealError::Io(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Ok(())
}

fn print_warnings(warnings: &[IntegrityWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}
