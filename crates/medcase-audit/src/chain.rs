//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. trail_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. canonical JSON of the published event (serde_json, no pretty-printing)

use sha2::{Digest, Sha256};

use medcase_contracts::event::PublishedEvent;

use crate::entry::AuditEntry;

/// Compute the SHA-256 hash for a single audit entry.
///
/// Returns a lowercase 64-character hex string.
///
/// # Panics
///
/// Panics if `event` cannot be serialized to JSON, which cannot happen for
/// the plain-data `PublishedEvent` type.
pub fn hash_entry(trail_id: &str, sequence: u64, event: &PublishedEvent, prev_hash: &str) -> String {
    let event_json =
        serde_json::to_vec(event).expect("PublishedEvent must always be serializable to JSON");

    let mut hasher = Sha256::new();
    hasher.update(trail_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&event_json);

    hex::encode(hasher.finalize())
}

/// Verify the integrity of a hash chain.
///
/// Checks prev-hash linkage (each entry points at its predecessor, the first
/// at `GENESIS_HASH`), hash correctness, and that sequence numbers run
/// 0, 1, 2, … without gaps. An empty chain is valid.
pub fn verify_chain(entries: &[AuditEntry]) -> bool {
    let mut expected_prev = AuditEntry::GENESIS_HASH.to_string();

    for (position, entry) in entries.iter().enumerate() {
        if entry.sequence != position as u64 || entry.prev_hash != expected_prev {
            return false;
        }

        let recomputed = hash_entry(&entry.trail_id, entry.sequence, &entry.event, &entry.prev_hash);
        if entry.this_hash != recomputed {
            return false;
        }

        expected_prev = entry.this_hash.clone();
    }

    true
}
