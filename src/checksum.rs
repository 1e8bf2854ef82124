//! SHA-256 checksum verification

use crate::error::IntegrityError;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Verify that `bytes` hash to `expected`.
///
/// The comparison is case-insensitive and ignores surrounding whitespace in
/// `expected`, so digests copied from `shasum` output or uppercase listings
/// both match.
pub fn verify(bytes: &[u8], expected: &str) -> Result<(), IntegrityError> {
    let actual = sha256_hex(bytes);
    let expected = expected.trim();

    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(IntegrityError::HashMismatch {
            expected: expected.to_ascii_lowercase(),
            actual,
        })
    }
}
