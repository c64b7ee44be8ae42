//! Per-publication policies resolved through declaration scopes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the variant token of a publication shows up in its coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantMode {
    /// `1.0-variant`
    #[default]
    WithVersion,
    /// `mylib-variant`
    WithArtifactId,
    /// Tracked for disambiguation only, never published.
    Invisible,
}

/// How artifacts of a publication get signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignType {
    #[serde(rename = "none")]
    NoSign,
    /// External keyring configured through `signing.keyId` and friends.
    Keyring,
    /// Key material embedded in the project's keybox file.
    #[default]
    Keybox,
}

impl SignType {
    pub fn should_sign(self) -> bool {
        self != SignType::NoSign
    }
}

impl fmt::Display for VariantMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VariantMode::WithVersion => "with-version",
            VariantMode::WithArtifactId => "with-artifact-id",
            VariantMode::Invisible => "invisible",
        })
    }
}

impl fmt::Display for SignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SignType::NoSign => "none",
            SignType::Keyring => "keyring",
            SignType::Keybox => "keybox",
        })
    }
}
