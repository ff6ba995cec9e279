//! In-memory implementation of `CaseStore`.
//!
//! `InMemoryCaseStore` keeps the record map and the insertion-order index
//! behind one `RwLock`, so an insert updates both under a single write guard
//! and readers never observe one without the other.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use medcase_contracts::{
    case::{CaseId, MedicalCase},
    error::{RegistryError, RegistryResult},
};

use crate::traits::CaseStore;

// ── Internal mutable state ────────────────────────────────────────────────────

#[derive(Default)]
struct StoreState {
    records: HashMap<CaseId, MedicalCase>,
    /// Ids in insertion order. Mirrors `records.keys()` exactly.
    order: Vec<CaseId>,
}

fn poisoned<T>(e: PoisonError<T>) -> RegistryError {
    RegistryError::StorageFailure {
        reason: format!("case store lock poisoned: {}", e),
    }
}

// ── Public store ──────────────────────────────────────────────────────────────

/// An in-memory, append-only case store.
#[derive(Default)]
pub struct InMemoryCaseStore {
    state: RwLock<StoreState>,
}

impl InMemoryCaseStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CaseStore for InMemoryCaseStore {
    fn insert(&self, record: MedicalCase) -> RegistryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;

        if state.records.contains_key(&record.case_id) {
            return Err(RegistryError::AlreadyExists {
                case_id: record.case_id,
            });
        }

        let case_id = record.case_id.clone();
        state.order.push(case_id.clone());
        state.records.insert(case_id.clone(), record);

        debug!(case_id = %case_id, stored = state.order.len(), "case inserted");
        Ok(())
    }

    fn get(&self, case_id: &CaseId) -> RegistryResult<MedicalCase> {
        let state = self.state.read().map_err(poisoned)?;
        state
            .records
            .get(case_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                case_id: case_id.clone(),
            })
    }

    fn update(
        &self,
        case_id: &CaseId,
        mutator: &mut dyn FnMut(&mut MedicalCase),
    ) -> RegistryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let record = state
            .records
            .get_mut(case_id)
            .ok_or_else(|| RegistryError::NotFound {
                case_id: case_id.clone(),
            })?;
        mutator(record);
        Ok(())
    }

    fn list(&self) -> RegistryResult<Vec<CaseId>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.order.clone())
    }

    fn contains(&self, case_id: &CaseId) -> RegistryResult<bool> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.records.contains_key(case_id))
    }

    fn count(&self) -> RegistryResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.order.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use medcase_contracts::{
        case::{Author, CaseId, CiphertextHandle, MedicalCase, PatientId},
        error::RegistryError,
    };

    use super::InMemoryCaseStore;
    use crate::traits::CaseStore;

    fn make_case(id: &str, history: &str) -> MedicalCase {
        MedicalCase {
            case_id: CaseId::new(id),
            patient_id: PatientId::new("p1"),
            ciphertext_handle: CiphertextHandle(format!("handle-{id}")),
            numeric_case_identifier: 1,
            medical_history: history.to_string(),
            author: Author::new("dr-a"),
            created_at: Utc::now(),
            decrypted_value: 0,
            is_verified: false,
        }
    }

    #[test]
    fn insert_then_get_returns_record() {
        let store = InMemoryCaseStore::new();
        store.insert(make_case("a", "first")).unwrap();

        let got = store.get(&CaseId::new("a")).unwrap();
        assert_eq!(got.medical_history, "first");
        assert!(store.contains(&CaseId::new("a")).unwrap());
    }

    /// A duplicate insert fails and leaves both the record and the index untouched.
    #[test]
    fn duplicate_insert_is_rejected_without_side_effects() {
        let store = InMemoryCaseStore::new();
        store.insert(make_case("a", "first")).unwrap();

        let err = store.insert(make_case("a", "second")).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists { .. }));

        assert_eq!(store.get(&CaseId::new("a")).unwrap().medical_history, "first");
        assert_eq!(store.list().unwrap(), vec![CaseId::new("a")]);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn get_and_update_unknown_id_fail_not_found() {
        let store = InMemoryCaseStore::new();
        let missing = CaseId::new("ghost");

        assert!(matches!(
            store.get(&missing),
            Err(RegistryError::NotFound { .. })
        ));
        assert!(matches!(
            store.update(&missing, &mut |c: &mut MedicalCase| c.is_verified = true),
            Err(RegistryError::NotFound { .. })
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn update_mutates_in_place() {
        let store = InMemoryCaseStore::new();
        store.insert(make_case("a", "h")).unwrap();

        store
            .update(&CaseId::new("a"), &mut |c: &mut MedicalCase| {
                c.decrypted_value = 9;
                c.is_verified = true;
            })
            .unwrap();

        let got = store.get(&CaseId::new("a")).unwrap();
        assert!(got.is_verified);
        assert_eq!(got.decrypted_value, 9);
    }

    /// `list()` preserves insertion order and can be called repeatedly.
    #[test]
    fn list_is_ordered_and_restartable() {
        let store = InMemoryCaseStore::new();
        for id in ["c", "a", "b"] {
            store.insert(make_case(id, "h")).unwrap();
        }

        let expected: Vec<CaseId> = ["c", "a", "b"].into_iter().map(CaseId::new).collect();
        assert_eq!(store.list().unwrap(), expected);
        assert_eq!(store.list().unwrap(), expected);
    }
}
