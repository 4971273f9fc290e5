//! Canonical hashing with domain separation.
//!
//! Every fingerprint in the workspace is `sha256(domain || data)`, rendered
//! as `"sha256:<hex>"`. Domain prefixes are null-terminated so no prefix can
//! be a prefix of another.

use sha2::{Digest, Sha256};

/// Algorithm tag for every hash produced here.
pub const HASH_ALGORITHM: &str = "sha256";

/// Domain prefix for search-state fingerprints.
pub const DOMAIN_SEARCH_STATE: &[u8] = b"LODESTAR::SEARCH_STATE::V1\0";

/// Domain prefix for audit-graph artifact hashing.
pub const DOMAIN_SEARCH_GRAPH: &[u8] = b"LODESTAR::SEARCH_GRAPH::V1\0";

/// Domain prefix for run-report digests.
pub const DOMAIN_RUN_REPORT: &[u8] = b"LODESTAR::RUN_REPORT::V1\0";

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
///
/// Invariant: the inner string contains a `:` with non-empty text on both
/// sides (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the colon is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
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

    /// The full `"algorithm:hex_digest"` string.
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

/// Hash `data` under `domain`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let digest = hex::encode(hasher.finalize());
    ContentHash {
        colon: HASH_ALGORITHM.len(),
        full: format!("{HASH_ALGORITHM}:{digest}"),
    }
}
