use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use envseal::cli::{
    handle_decrypt_command, handle_encrypt_command, handle_generate_key_command,
    handle_password_key_command, handle_verify_command, DecryptArgs, EncryptArgs,
    GenerateKeyArgs, PasswordKeyArgs, VerifyArgs,
};
use envseal::config::{paths::EnvsealPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "envseal",
    author = "Kaylee Beyene",
    version,
    about = "Authenticated encryption for environment and config files",
    long_about = "envseal encrypts .env and config files with AES-256-GCM. \
                  Each encrypted file carries SHA-256 hashes of the plaintext \
                  and of the envelope itself, both checked on decryption."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file
    Encrypt(EncryptArgs),

    /// Decrypt a file
    Decrypt(DecryptArgs),

    /// Check that a file decrypts and passes its integrity checks
    Verify(VerifyArgs),

    /// Generate a random key file
    GenerateKey(GenerateKeyArgs),

    /// Derive a key file from a password
    GenerateKeyFromPassword(PasswordKeyArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let paths = EnvsealPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Encrypt(args)) => handle_encrypt_command(&paths, &settings, args)?,
        Some(Commands::Decrypt(args)) => handle_decrypt_command(&paths, &settings, args)?,
        Some(Commands::Verify(args)) => handle_verify_command(&paths, &settings, args)?,
        Some(Commands::GenerateKey(args)) => {
            handle_generate_key_command(&paths, &settings, args)?
        }
        Some(Commands::GenerateKeyFromPassword(args)) => {
            handle_password_key_command(&paths, &settings, args)?
        }
        Some(Commands::Config) => {
            println!("envseal Configuration");
            println!("=====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!(
                "Key file:         {}",
                settings.key_file(&paths, None).display()
            );
            println!();
            println!("Settings:");
            println!("  Validate integrity: {}", settings.validate_integrity);
            println!("  Overwrite outputs:  {}", settings.overwrite_outputs);
        }
        None => {
            println!("envseal - Authenticated encryption for environment files");
            println!();
            println!("Run 'envseal --help' for usage information.");
        }
    }

    Ok(())
}
