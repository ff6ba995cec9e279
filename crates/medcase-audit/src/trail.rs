//! In-memory audit trail of committed domain events.
//!
//! `AuditTrail` is an `EventSink` that appends every event it receives to a
//! SHA-256 hash chain held behind a `Mutex`. Use `export_log()` to obtain a
//! snapshot and `verify_integrity()` to confirm nothing was altered in place.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, warn};

use medcase_contracts::{
    case::CaseId,
    error::{RegistryError, RegistryResult},
    event::PublishedEvent,
};
use medcase_core::traits::EventSink;

use crate::{
    chain::{hash_entry, verify_chain},
    entry::{AuditEntry, AuditLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct TrailState {
    pub(crate) entries: Vec<AuditEntry>,
    pub(crate) sequence: u64,
    pub(crate) last_hash: String,
}

// ── Public trail ──────────────────────────────────────────────────────────────

/// An append-only, hash-chained record of domain events.
pub struct AuditTrail {
    trail_id: String,
    pub(crate) state: Arc<Mutex<TrailState>>,
}

impl AuditTrail {
    /// Create an empty trail with the given id.
    pub fn new(trail_id: impl Into<String>) -> Self {
        Self {
            trail_id: trail_id.into(),
            state: Arc::new(Mutex::new(TrailState {
                entries: Vec::new(),
                sequence: 0,
                last_hash: AuditEntry::GENESIS_HASH.to_string(),
            })),
        }
    }

    /// Create an empty trail with a random v4 UUID as its id.
    pub fn with_random_id() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// The id this trail hashes into every entry.
    pub fn trail_id(&self) -> &str {
        &self.trail_id
    }

    /// Append one event to the chain.
    pub fn append(&self, event: &PublishedEvent) -> RegistryResult<()> {
        let mut state = self.state.lock().map_err(|e| RegistryError::StorageFailure {
            reason: format!("audit trail lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;
        let this_hash = hash_entry(&self.trail_id, sequence, event, &prev_hash);

        state.entries.push(AuditEntry {
            sequence,
            trail_id: self.trail_id.clone(),
            event: event.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.sequence += 1;
        state.last_hash = this_hash;

        debug!(
            trail_id = %self.trail_id,
            sequence,
            kind = event.event.kind(),
            case_id = %event.event.case_id(),
            "audit entry appended"
        );
        Ok(())
    }

    /// Snapshot every entry written so far.
    pub fn export_log(&self) -> RegistryResult<AuditLog> {
        let state = self.state.lock().map_err(|e| RegistryError::StorageFailure {
            reason: format!("audit trail lock poisoned: {}", e),
        })?;

        Ok(AuditLog {
            trail_id: self.trail_id.clone(),
            entries: state.entries.clone(),
            exported_at: Utc::now(),
            terminal_hash: state
                .entries
                .last()
                .map(|e| e.this_hash.clone())
                .unwrap_or_default(),
        })
    }

    /// All entries concerning one case, in chain order.
    pub fn history_of(&self, case_id: &CaseId) -> RegistryResult<Vec<AuditEntry>> {
        Ok(self
            .export_log()?
            .entries
            .into_iter()
            .filter(|e| e.event.event.case_id() == case_id)
            .collect())
    }

    /// Confirm the in-memory chain has not been tampered with.
    ///
    /// A poisoned lock counts as a failed check.
    pub fn verify_integrity(&self) -> bool {
        match self.state.lock() {
            Ok(state) => verify_chain(&state.entries),
            Err(_) => false,
        }
    }
}

// ── EventSink impl ────────────────────────────────────────────────────────────

impl EventSink for AuditTrail {
    fn publish(&self, event: &PublishedEvent) {
        if let Err(e) = self.append(event) {
            warn!(
                trail_id = %self.trail_id,
                case_id = %event.event.case_id(),
                error = %e,
                "audit append failed; event not recorded"
            );
        }
    }
}
