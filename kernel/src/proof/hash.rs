//! Canonical hashing types and domain separation constants.
//!
//! Algorithm: SHA-256 for every artifact. Each domain prefix is
//! null-terminated and hashed ahead of the payload, so equal bytes in two
//! domains never share a digest.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`)
///
/// Invariant: the inner string always contains exactly one `:` separator,
/// with non-empty substrings on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the format is invalid (missing colon,
    /// empty algorithm, empty digest, or more than one colon).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    fn sha256(digest: &[u8]) -> Self {
        let full = format!("sha256:{}", hex::encode(digest));
        Self { full, colon: 6 }
    }

    /// The algorithm portion (e.g., "sha256").
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full string representation (`"algorithm:hex_digest"`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Domain prefix for grid state fingerprints.
pub const DOMAIN_GRID_STATE: &[u8] = b"OCTILE::GRID_STATE::V1\0";

/// Domain prefix for canonical search trace bytes.
pub const DOMAIN_SEARCH_TRACE: &[u8] = b"OCTILE::SEARCH_TRACE::V1\0";

/// Domain prefix for run bundle artifacts.
pub const DOMAIN_BUNDLE_ARTIFACT: &[u8] = b"OCTILE::BUNDLE_ARTIFACT::V1\0";

/// Domain prefix for the run bundle digest.
pub const DOMAIN_BUNDLE_DIGEST: &[u8] = b"OCTILE::BUNDLE_DIGEST::V1\0";

/// Compute the canonical hash of a byte slice with domain separation.
///
/// Hash = `sha256(domain || data)`, rendered as `"sha256:<hex_digest>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    ContentHash::sha256(&hasher.finalize())
}
