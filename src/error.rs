//! Error kinds for each stage of the install pipeline.
//!
//! Every stage has its own typed error so callers can match on the exact
//! failure. [`BrewletError`] wraps them for the CLI, which prints
//! [`BrewletError::kind`] and exits with [`BrewletError::exit_code`].

use thiserror::Error;

/// Manifest failed validation before any network or filesystem work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),

    #[error("install target `{0}` must be a single path segment")]
    UnsafePath(String),

    #[error("expected hash `{0}` is not a 64-character hex SHA-256 digest")]
    InvalidHash(String),
}

/// Artifact could not be retrieved.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error fetching {url}: {reason}")]
    NetworkError { url: String, reason: String },

    #[error("HTTP {status} fetching {url}")]
    HttpError { url: String, status: u16 },
}

/// Fetched content does not match the manifest digest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("SHA-256 mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },
}

/// Artifact could not be written into place.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl InstallError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        InstallError::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Any failure surfaced by the CLI.
#[derive(Error, Debug)]
pub enum BrewletError {
    #[error("Failed to load manifest: {0:#}")]
    Manifest(anyhow::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    #[error(transparent)]
    Install(#[from] InstallError),
}

impl BrewletError {
    /// Stable name of the failure kind, printed on stderr.
    pub fn kind(&self) -> &'static str {
        match self {
            BrewletError::Manifest(_) => "ManifestError",
            BrewletError::Validation(ValidationError::MissingField(_)) => "MissingField",
            BrewletError::Validation(ValidationError::UnsafePath(_)) => "UnsafePath",
            BrewletError::Validation(ValidationError::InvalidHash(_)) => "InvalidHash",
            BrewletError::Fetch(FetchError::NetworkError { .. }) => "NetworkError",
            BrewletError::Fetch(FetchError::HttpError { .. }) => "HTTPError",
            BrewletError::Integrity(IntegrityError::HashMismatch { .. }) => "HashMismatch",
            BrewletError::Install(InstallError::IoError { .. }) => "IOError",
        }
    }

    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            BrewletError::Manifest(_) | BrewletError::Validation(_) => 2,
            BrewletError::Fetch(_) => 3,
            BrewletError::Integrity(_) => 4,
            BrewletError::Install(_) => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, BrewletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let err: BrewletError = ValidationError::MissingField("source_url").into();
        assert_eq!(err.kind(), "MissingField");
        assert_eq!(err.exit_code(), 2);

        let err: BrewletError = FetchError::HttpError {
            url: "https://example.test".into(),
            status: 404,
        }
        .into();
        assert_eq!(err.kind(), "HTTPError");
        assert_eq!(err.exit_code(), 3);

        let err: BrewletError = IntegrityError::HashMismatch {
            expected: "aa".into(),
            actual: "bb".into(),
        }
        .into();
        assert_eq!(err.kind(), "HashMismatch");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_hash_mismatch_message_has_both_digests() {
        let err = IntegrityError::HashMismatch {
            expected: "abc".into(),
            actual: "def".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc"));
        assert!(msg.contains("def"));
    }

    #[test]
    fn test_install_error_keeps_path() {
        let err = InstallError::io(
            std::path::Path::new("/tmp/bin/tool"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        let err: BrewletError = err.into();
        assert_eq!(err.kind(), "IOError");
        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("/tmp/bin/tool"));
    }
}
