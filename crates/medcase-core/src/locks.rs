//! Per-case mutual exclusion.
//!
//! `KeyedLocks` hands out one mutex per case id. Two operations on the same
//! id serialize; operations on distinct ids never contend beyond the brief
//! table lookup. Slots are reclaimed once nobody holds or waits on them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use medcase_contracts::{
    case::CaseId,
    error::{RegistryError, RegistryResult},
};

/// Table of per-key locks.
#[derive(Default)]
pub struct KeyedLocks {
    table: Mutex<HashMap<CaseId, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `key`.
    ///
    /// Blocks until any other holder of the same key releases it.
    pub fn with_lock<T>(
        &self,
        key: &CaseId,
        f: impl FnOnce() -> RegistryResult<T>,
    ) -> RegistryResult<T> {
        let slot = {
            let mut table = self.table.lock().map_err(|e| RegistryError::StorageFailure {
                reason: format!("lock table poisoned: {}", e),
            })?;
            Arc::clone(table.entry(key.clone()).or_default())
        };

        let result = match slot.lock() {
            Ok(_guard) => f(),
            Err(e) => Err(RegistryError::StorageFailure {
                reason: format!("lock for case '{}' poisoned: {}", key, e),
            }),
        };

        self.release(key, slot);
        result
    }

    /// Number of keys currently tracked.
    pub fn tracked(&self) -> usize {
        self.table.lock().map(|t| t.len()).unwrap_or(0)
    }

    // The table holds one reference and the caller another; anything above
    // two means a waiter cloned the slot and will still lock it.
    fn release(&self, key: &CaseId, slot: Arc<Mutex<()>>) {
        if let Ok(mut table) = self.table.lock() {
            if Arc::strong_count(&slot) == 2 {
                table.remove(key);
            }
        }
    }
}
