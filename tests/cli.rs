use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn envseal(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("envseal").unwrap();
    cmd.env("ENVSEAL_CONFIG_DIR", config_dir)
        .env_remove("ENVSEAL_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn encrypt_then_decrypt_round_trip() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("test.key");
    let plain = dir.path().join(".env");
    let sealed = dir.path().join(".env.enc");
    let restored = dir.path().join(".env.restored");
    fs::write(&plain, "DB_PASSWORD=secret\n").unwrap();

    envseal(dir.path())
        .args(["generate-key", "--output"])
        .arg(&key)
        .assert()
        .success();
    assert_eq!(fs::read(&key).unwrap().len(), 32);

    envseal(dir.path())
        .arg("encrypt")
        .arg("--input")
        .arg(&plain)
        .arg("--output")
        .arg(&sealed)
        .arg("--key-file")
        .arg(&key)
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted"));

    let stored = fs::read_to_string(&sealed).unwrap();
    assert!(stored.contains("\"file_sha\": "));
    assert!(!stored.contains("DB_PASSWORD"));

    envseal(dir.path())
        .arg("decrypt")
        .arg("--input")
        .arg(&sealed)
        .arg("--output")
        .arg(&restored)
        .arg("--key-file")
        .arg(&key)
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning").not());

    assert_eq!(fs::read_to_string(&restored).unwrap(), "DB_PASSWORD=secret\n");
}

#[test]
fn corrupted_envelope_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("test.key");
    let plain = dir.path().join(".env");
    let sealed = dir.path().join(".env.enc");
    let restored = dir.path().join(".env.restored");
    fs::write(&key, [4u8; 32]).unwrap();
    fs::write(&plain, "DB_PASSWORD=secret").unwrap();

    envseal(dir.path())
        .arg("encrypt")
        .arg("-i")
        .arg(&plain)
        .arg("-o")
        .arg(&sealed)
        .arg("-k")
        .arg(&key)
        .assert()
        .success();

    let stored = fs::read_to_string(&sealed).unwrap();
    let marker = "\"ciphertext\": \"";
    let at = stored.find(marker).unwrap() + marker.len();
    let original = stored[at..].chars().next().unwrap();
    let replacement = if original == 'A' { "B" } else { "A" };
    let corrupted = format!("{}{}{}", &stored[..at], replacement, &stored[at + 1..]);
    fs::write(&sealed, corrupted).unwrap();

    envseal(dir.path())
        .arg("decrypt")
        .arg("-i")
        .arg(&sealed)
        .arg("-o")
        .arg(&restored)
        .arg("-k")
        .arg(&key)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Integrity check failed"));

    assert!(!restored.exists());
}

#[test]
fn legacy_envelope_decrypts_with_warnings() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("test.key");
    let sealed = dir.path().join("legacy.enc");
    let restored = dir.path().join("legacy.env");
    let key_bytes: Vec<u8> = (0u8..32).collect();
    fs::write(&key, key_bytes).unwrap();
    fs::write(
        &sealed,
        r#"{"ciphertext": "A0CJS4S2kUzCE9O2wowbH+ai", "nonce": "AAECAwQFBgcICQoL", "tag": "I2Xl1vnMFMXabh3YCvbeQw=="}"#,
    )
    .unwrap();

    envseal(dir.path())
        .arg("decrypt")
        .arg("-i")
        .arg(&sealed)
        .arg("-o")
        .arg(&restored)
        .arg("-k")
        .arg(&key)
        .assert()
        .success()
        .stderr(predicate::str::contains("file_sha missing"))
        .stderr(predicate::str::contains("sha missing. Plaintext"));

    assert_eq!(fs::read_to_string(&restored).unwrap(), "DB_PASSWORD=secret");
}

#[test]
fn refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("test.key");
    let plain = dir.path().join(".env");
    let sealed = dir.path().join(".env.enc");
    fs::write(&key, [4u8; 32]).unwrap();
    fs::write(&plain, "A=1").unwrap();
    fs::write(&sealed, "keep me").unwrap();

    envseal(dir.path())
        .arg("encrypt")
        .arg("-i")
        .arg(&plain)
        .arg("-o")
        .arg(&sealed)
        .arg("-k")
        .arg(&key)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(&sealed).unwrap(), "keep me");

    envseal(dir.path())
        .arg("encrypt")
        .arg("-i")
        .arg(&plain)
        .arg("-o")
        .arg(&sealed)
        .arg("-k")
        .arg(&key)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn password_key_uses_default_key_file() {
    let dir = TempDir::new().unwrap();

    envseal(dir.path())
        .args([
            "generate-key-from-password",
            "--salt",
            "000102030405060708090a0b0c0d0e0f",
        ])
        .env("ENVSEAL_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Salt: 000102030405060708090a0b0c0d0e0f",
        ));

    let default_key = dir.path().join("keys").join("default.key");
    assert_eq!(fs::read(default_key).unwrap().len(), 32);

    let plain = dir.path().join(".env");
    fs::write(&plain, "A=1").unwrap();
    envseal(dir.path())
        .arg("verify")
        .arg("-i")
        .arg(&plain)
        .assert()
        .failure();
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    envseal(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validate integrity: true"));
}

#[cfg(unix)]
#[test]
fn generated_key_is_not_readable_by_others() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let key = dir.path().join("test.key");

    envseal(dir.path())
        .args(["generate-key", "--output"])
        .arg(&key)
        .assert()
        .success();

    let mode = fs::metadata(&key).unwrap().permissions().mode();
    assert_eq!(mode & 0o077, 0, "key file mode is {:o}", mode);
}

#[test]
fn password_key_rejects_empty_password() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("test.key");

    envseal(dir.path())
        .args(["generate-key-from-password", "--password", "", "--output"])
        .arg(&key)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Password must not be empty"));

    assert!(!key.exists());
}

#[test]
fn password_key_rejects_bad_salt_before_prompting() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("test.key");

    envseal(dir.path())
        .args(["generate-key-from-password", "--salt", "0011", "--output"])
        .arg(&key)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid salt"));

    assert!(!key.exists());
}
