//! The persisted encryption envelope
//!
//! An envelope is a JSON object with the AEAD output split into three base64
//! fields plus two optional SHA-256 digests:
//!
//! ```json
//! {"ciphertext": "...", "nonce": "...", "tag": "...", "sha": "...", "file_sha": "..."}
//! ```
//!
//! [`Envelope::canonical_json`] is the only serializer used for hashing, and
//! [`Envelope::to_json`] writes files with the same formatter, so the bytes
//! covered by `file_sha` never drift between writing and verifying.

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::{EnvsealError, EnvsealResult};

/// An encrypted payload with its integrity metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope {
    /// AES-256-GCM ciphertext without the tag (base64)
    pub ciphertext: String,
    /// 96-bit nonce (base64)
    pub nonce: String,
    /// 128-bit authentication tag (base64)
    pub tag: String,
    /// SHA-256 of the plaintext (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    /// SHA-256 of the canonical serialization of every other field (hex)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_sha: Option<String>,
}

impl Envelope {
    /// Create an envelope without integrity metadata
    pub fn new(
        ciphertext: impl Into<String>,
        nonce: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            nonce: nonce.into(),
            tag: tag.into(),
            sha: None,
            file_sha: None,
        }
    }

    /// Serialize every field except `file_sha`
    ///
    /// This is the exact input to the `file_sha` digest.
    pub fn canonical_json(&self) -> EnvsealResult<String> {
        let unhashed = Envelope {
            file_sha: None,
            ..self.clone()
        };
        unhashed.to_json()
    }

    /// Serialize the whole envelope in canonical form
    pub fn to_json(&self) -> EnvsealResult<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| EnvsealError::Json(e.to_string()))
    }

    /// Parse an envelope from JSON text
    pub fn from_json(json: &str) -> EnvsealResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Compact JSON with `", "` and `": "` separators
///
/// Envelopes written by earlier tools use these separators, and their
/// `file_sha` values were computed over this layout. serde_json never
/// escapes non-ASCII text, which the canonical form also requires.
struct CanonicalFormatter;

impl serde_json::ser::Formatter for CanonicalFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
