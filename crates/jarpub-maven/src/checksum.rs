//! Checksum sidecars (MD5, SHA-1, SHA-256, SHA-512) of published files.

use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use jarpub_util::errors::{PublishError, PublishResult};

/// Algorithms Maven repositories publish sidecars for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumKind {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl ChecksumKind {
    pub const ALL: [ChecksumKind; 4] = [
        ChecksumKind::Md5,
        ChecksumKind::Sha1,
        ChecksumKind::Sha256,
        ChecksumKind::Sha512,
    ];

    /// Sidecar file extension, with the leading dot.
    pub fn suffix(self) -> &'static str {
        match self {
            ChecksumKind::Md5 => ".md5",
            ChecksumKind::Sha1 => ".sha1",
            ChecksumKind::Sha256 => ".sha256",
            ChecksumKind::Sha512 => ".sha512",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChecksumKind::Md5 => "MD5",
            ChecksumKind::Sha1 => "SHA-1",
            ChecksumKind::Sha256 => "SHA-256",
            ChecksumKind::Sha512 => "SHA-512",
        }
    }

    /// The algorithm and the checked file name of a sidecar file name.
    pub fn split_sidecar(name: &str) -> Option<(ChecksumKind, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|kind| name.strip_suffix(kind.suffix()).map(|base| (kind, base)))
    }

    pub fn hex_digest(self, data: &[u8]) -> String {
        match self {
            ChecksumKind::Md5 => hex::<Md5>(data),
            ChecksumKind::Sha1 => hex::<Sha1>(data),
            ChecksumKind::Sha256 => hex::<Sha256>(data),
            ChecksumKind::Sha512 => hex::<Sha512>(data),
        }
    }
}

fn hex<D: Digest>(data: &[u8]) -> String {
    let mut hasher = D::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Extract the hex hash from a checksum file.
///
/// Maven checksum files may contain just the hash, or `hash  filename`.
pub fn extract_hash(content: &str) -> String {
    content.split_whitespace().next().unwrap_or("").to_string()
}

/// Check `file` against the sidecar at `sidecar`.
pub fn verify_sidecar(file: &Path, sidecar: &Path, kind: ChecksumKind) -> PublishResult<()> {
    let data = std::fs::read(file)?;
    let expected = extract_hash(&std::fs::read_to_string(sidecar)?);
    let actual = kind.hex_digest(&data);
    if actual.eq_ignore_ascii_case(&expected) {
        tracing::debug!("{} ok for {}", kind.label(), file.display());
        Ok(())
    } else {
        Err(PublishError::ChecksumMismatch {
            algorithm: kind.label().to_string(),
            path: file.display().to_string(),
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_hash_simple() {
        assert_eq!(extract_hash("abc123\n"), "abc123");
    }

    #[test]
    fn extract_hash_with_filename() {
        assert_eq!(extract_hash("abc123  my-lib-1.0.jar\n"), "abc123");
    }

    #[test]
    fn digests() {
        assert_eq!(
            ChecksumKind::Sha256.hex_digest(b"hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(
            ChecksumKind::Md5.hex_digest(b"hello world"),
            "5eb63bbbe01eeed093cb22bb8f5acdc3"
        );
        assert_eq!(
            ChecksumKind::Sha1.hex_digest(b"hello world"),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
        assert_eq!(ChecksumKind::Sha512.hex_digest(b"").len(), 128);
    }

    #[test]
    fn split_sidecar_names() {
        assert_eq!(
            ChecksumKind::split_sidecar("mylib-1.0.jar.sha256"),
            Some((ChecksumKind::Sha256, "mylib-1.0.jar"))
        );
        assert_eq!(ChecksumKind::split_sidecar("mylib-1.0.jar"), None);
    }
}
