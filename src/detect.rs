//! Content fingerprinting and the skip/reprocess decision.
//!
//! The decision is a pure function over the stored fingerprint, the fresh
//! fingerprint, and the number of blocks already persisted for the code,
//! so all four branches are unit-testable without a database.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest over the exact raw file text.
pub fn fingerprint(raw: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// What to do with a scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip,
    Reprocess(ReprocessReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReprocessReason {
    /// No registry row for this code yet.
    New,
    /// Stored fingerprint differs from the fresh one.
    Changed,
    /// Fingerprint matches but zero blocks are stored: a prior run wrote
    /// the registry row and then failed before its blocks landed. The
    /// "unchanged" signal is stale and must not be trusted.
    Repair,
}

/// Decide skip vs. reprocess for one file.
///
/// The asymmetry matters: "hash unchanged" alone is not enough to skip.
/// Skipping requires at least one persisted block, otherwise a partial
/// prior failure would permanently shadow the file's content.
pub fn decide(prior_hash: Option<&str>, new_hash: &str, persisted_blocks: i64) -> Decision {
    match prior_hash {
        None => Decision::Reprocess(ReprocessReason::New),
        Some(prior) if prior != new_hash => Decision::Reprocess(ReprocessReason::Changed),
        Some(_) if persisted_blocks > 0 => Decision::Skip,
        Some(_) => Decision::Reprocess(ReprocessReason::Repair),
    }
}
