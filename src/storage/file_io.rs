//! File I/O utilities with atomic writes
//!
//! Outputs are written to a temporary file next to the target and renamed
//! into place, so a failed operation never leaves a partial output behind.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::envelope::Envelope;
use crate::error::{EnvsealError, EnvsealResult};

/// Read a whole file as UTF-8 text
pub fn read_text<P: AsRef<Path>>(path: P) -> EnvsealResult<String> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .map_err(|e| EnvsealError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Read a whole file as raw bytes
pub fn read_bytes<P: AsRef<Path>>(path: P) -> EnvsealResult<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path)
        .map_err(|e| EnvsealError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

/// Read and parse an envelope file
pub fn read_envelope<P: AsRef<Path>>(path: P) -> EnvsealResult<Envelope> {
    let path = path.as_ref();
    let contents = read_text(path)?;
    Envelope::from_json(&contents).map_err(|e| {
        EnvsealError::Json(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write an envelope file atomically in canonical form
pub fn write_envelope<P: AsRef<Path>>(path: P, envelope: &Envelope) -> EnvsealResult<()> {
    let json = envelope.to_json()?;
    write_atomic(path, json.as_bytes())
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at all,
/// preventing corruption on crashes or power failures. The temp file gets a
/// unique name and is owner-only (0600 on Unix) before any byte is written,
/// and the renamed output keeps that mode.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> EnvsealResult<()> {
    let path = path.as_ref();

    // Ensure parent directory exists
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| {
                EnvsealError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
            parent
        }
        None => Path::new("."),
    };

    // Create temp file in same directory (important for atomic rename)
    let mut builder = tempfile::Builder::new();
    builder.prefix(".envseal-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o600));
    }
    let mut temp = builder
        .tempfile_in(parent)
        .map_err(|e| EnvsealError::Io(format!("Failed to create temp file: {}", e)))?;

    temp.write_all(contents)
        .map_err(|e| EnvsealError::Io(format!("Failed to write data: {}", e)))?;

    // Sync to disk before rename
    temp.as_file()
        .sync_all()
        .map_err(|e| EnvsealError::Io(format!("Failed to sync data: {}", e)))?;

    // A failed persist hands the temp file back and dropping it removes it
    temp.persist(path)
        .map_err(|e| EnvsealError::Io(format!("Failed to rename temp file: {}", e.error)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");

        write_atomic(&path, b"KEY=value\n").unwrap();
        assert_eq!(read_text(&path).unwrap(), "KEY=value\n");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secrets.enc");

        write_atomic(&path, b"data").unwrap();

        assert!(path.exists());
        let entries: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_atomic_write_leaves_neighbouring_tmp_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secrets.enc");
        let neighbour = temp_dir.path().join("secrets.enc.tmp");
        fs::write(&neighbour, "user data").unwrap();

        write_atomic(&path, b"data").unwrap();

        assert_eq!(fs::read_to_string(&neighbour).unwrap(), "user data");
        assert_eq!(read_bytes(&path).unwrap(), b"data");
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.key");

        write_atomic(&path, &[7u8; 32]).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "mode {:o} is readable by others", mode);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_tightens_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.key");
        fs::write(&path, b"old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, &[7u8; 32]).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("out.env");

        write_atomic(&path, b"A=1").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.env");

        write_atomic(&path, b"old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(read_bytes(&path).unwrap(), b"new");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_text(temp_dir.path().join("missing.env")).unwrap_err();
        assert!(matches!(err, EnvsealError::Io(_)));
    }

    #[test]
    fn test_envelope_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("env.enc");
        let envelope = Envelope::new("YQ==", "Yg==", "Yw==");

        write_envelope(&path, &envelope).unwrap();
        assert_eq!(
            read_text(&path).unwrap(),
            r#"{"ciphertext": "YQ==", "nonce": "Yg==", "tag": "Yw=="}"#
        );
        assert_eq!(read_envelope(&path).unwrap(), envelope);
    }

    #[test]
    fn test_read_envelope_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("env.enc");
        fs::write(&path, "not json at all").unwrap();

        let err = read_envelope(&path).unwrap_err();
        assert!(matches!(err, EnvsealError::Json(_)));
    }
}
