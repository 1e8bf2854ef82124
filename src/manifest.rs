//! Declarative manifest describing a single installable artifact.
//!
//! A manifest plays the role of a Homebrew formula for one file: where to
//! download it from, the SHA-256 it must hash to, and the name it is
//! installed under in the prefix's `bin/` directory.
//!
//! Manifests are read from JSON (`.json`) or TOML (any other extension).
//! Field names follow snake_case, with formula-style aliases accepted:
//!
//! ```toml
//! name = "installer-script"
//! desc = "A script to set up my environment"
//! homepage = "https://github.com/user/repo"
//! url = "https://example.test/installer.sh"
//! sha256 = "faebeb8da80ca8184c42294cf6f02bfdfd9fec510c6cff910ffaa75a9836a2d6"
//! target = "my-installer"
//! ```
//!
//! Missing fields deserialize to empty strings so [`Manifest::validate`]
//! can report them as [`ValidationError::MissingField`].

use crate::error::ValidationError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Length of a hex-encoded SHA-256 digest
const SHA256_HEX_LEN: usize = 64;

/// An installable artifact's source, digest and destination
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub name: String,
    #[serde(alias = "desc")]
    pub description: String,
    pub homepage: String,
    #[serde(alias = "url", alias = "sourceURL")]
    pub source_url: String,
    #[serde(alias = "sha256", alias = "expectedHash")]
    pub expected_hash: String,
    pub version: Option<String>,
    #[serde(alias = "target", alias = "installTargetName")]
    pub install_target_name: String,
    #[serde(alias = "caveats", alias = "caveatsTemplate")]
    pub caveats_template: Option<String>,
}

impl Manifest {
    /// Read and parse a manifest file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&contents)
                .with_context(|| format!("Failed to parse manifest: {}", path.display()))
        } else {
            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse manifest: {}", path.display()))
        }
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Check the invariants required before an install may proceed.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingField`] when `name`, `source_url`,
    ///   `expected_hash` or `install_target_name` is empty
    /// - [`ValidationError::UnsafePath`] when the install target is not a
    ///   single path segment
    /// - [`ValidationError::InvalidHash`] when the digest is not 64 hex chars
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let required = [
            ("source_url", &self.source_url),
            ("expected_hash", &self.expected_hash),
            ("install_target_name", &self.install_target_name),
            ("name", &self.name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        if !is_single_segment(&self.install_target_name) {
            return Err(ValidationError::UnsafePath(self.install_target_name.clone()));
        }

        let hash = self.expected_hash.trim();
        if hash.len() != SHA256_HEX_LEN || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidHash(self.expected_hash.clone()));
        }

        Ok(())
    }

    /// Declared version, treating blank strings as unversioned
    pub fn declared_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// A file name that cannot escape the directory it is joined onto
fn is_single_segment(name: &str) -> bool {
    !(name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
        || name == "."
        || name == "..")
}
