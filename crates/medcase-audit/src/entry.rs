//! Audit entry and log types.
//!
//! `AuditEntry` wraps one published domain event with its position in the
//! chain and the hashes that make tampering detectable. `AuditLog` is the
//! exported snapshot of a trail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medcase_contracts::event::PublishedEvent;

/// A single link in the SHA-256 hash chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The trail this entry belongs to.
    pub trail_id: String,

    /// The domain event as published by the registry.
    pub event: PublishedEvent,

    /// Hash of the previous entry, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// Hash of this entry's canonical content.
    pub this_hash: String,
}

impl AuditEntry {
    /// The `prev_hash` of the first entry in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// An exported snapshot of an audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub trail_id: String,

    /// All entries in chain order.
    pub entries: Vec<AuditEntry>,

    pub exported_at: DateTime<Utc>,

    /// The `this_hash` of the last entry; empty when the log is empty.
    pub terminal_hash: String,
}
