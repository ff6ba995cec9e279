//! The MEDCASE case registry: the confidential-case state machine.
//!
//! The registry enforces the per-case lifecycle:
//!
//!   (absent) ──create──▶ Created ──verify──▶ Verified (terminal)
//!
//! Every operation validates before it mutates. External authority calls run
//! outside the per-case lock; the guard that made the call worthwhile
//! (non-existence for create, not-yet-verified for verify) is re-checked
//! under the lock before anything is committed.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use medcase_contracts::{
    authority::AdmissionContext,
    case::{
        Author, CaseId, CaseStatus, CaseView, CiphertextHandle, MedicalCase, NewCase,
        VerifyRequest,
    },
    error::{RegistryError, RegistryResult},
    event::{DomainEvent, PublishedEvent},
};

use crate::{
    locks::KeyedLocks,
    traits::{AttestationAuthority, CaseStore, CiphertextAuthority, EventSink},
};

/// Decode an attested cleartext as a big-endian `u32`.
///
/// Exactly four bytes are accepted; anything else is `MalformedInput`.
pub fn decode_cleartext(bytes: &[u8]) -> RegistryResult<u32> {
    let raw: [u8; 4] = bytes
        .try_into()
        .map_err(|_| RegistryError::MalformedInput {
            reason: format!(
                "cleartext must be a 4-byte unsigned integer, got {} bytes",
                bytes.len()
            ),
        })?;
    Ok(u32::from_be_bytes(raw))
}

/// The case registry.
///
/// Construct one registry per store. All collaborators are injected; the
/// registry holds no global or ambient state of its own beyond the per-case
/// lock table.
pub struct CaseRegistry {
    principal: String,
    store: Arc<dyn CaseStore>,
    ciphertexts: Arc<dyn CiphertextAuthority>,
    attestations: Arc<dyn AttestationAuthority>,
    events: Arc<dyn EventSink>,
    locks: KeyedLocks,
}

impl CaseRegistry {
    /// Create a registry acting as `principal` towards the authorities.
    pub fn new(
        principal: impl Into<String>,
        store: Arc<dyn CaseStore>,
        ciphertexts: Arc<dyn CiphertextAuthority>,
        attestations: Arc<dyn AttestationAuthority>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            principal: principal.into(),
            store,
            ciphertexts,
            attestations,
            events,
            locks: KeyedLocks::new(),
        }
    }

    /// The principal name this registry is granted access under.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Open a new case.
    ///
    /// # Pipeline
    ///
    /// 1. Reject an id that already exists, before any external call
    /// 2. Admit the ciphertext; grant the registry access to the handle and
    ///    mark it publicly decryptable
    /// 3. Build the record (`is_verified = false`, `decrypted_value = 0`)
    /// 4. Under the case lock: re-check existence, insert
    /// 5. Publish `CaseCreated`
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the id is taken (including by a concurrent creator
    /// that won the race), `InvalidCiphertext` if admission fails. On error
    /// no record exists for the id.
    pub fn create(&self, request: NewCase, author: &Author) -> RegistryResult<CiphertextHandle> {
        let case_id = request.case_id.clone();

        debug!(case_id = %case_id, author = %author, "create starting");

        // ── Step 1: Cheap uniqueness guard ───────────────────────────────────
        if self.store.contains(&case_id)? {
            warn!(case_id = %case_id, "create rejected: case already exists");
            return Err(RegistryError::AlreadyExists { case_id });
        }

        // ── Step 2: Admission (outside the lock) ─────────────────────────────
        let context = AdmissionContext::new(self.principal.clone(), author.clone());
        let handle = self
            .ciphertexts
            .admit(&request.ciphertext, &request.proof, &context)
            .map_err(|e| {
                warn!(case_id = %case_id, error = %e, "ciphertext admission failed");
                e
            })?;
        self.ciphertexts.allow(&handle, &self.principal)?;
        self.ciphertexts.make_publicly_decryptable(&handle)?;

        debug!(case_id = %case_id, handle = %handle, "ciphertext admitted");

        // ── Step 3: Build the record ─────────────────────────────────────────
        let record = MedicalCase {
            case_id: case_id.clone(),
            patient_id: request.patient_id,
            ciphertext_handle: handle.clone(),
            numeric_case_identifier: request.numeric_case_identifier,
            medical_history: request.medical_history,
            author: author.clone(),
            created_at: Utc::now(),
            decrypted_value: 0,
            is_verified: false,
        };

        // ── Step 4: Commit under the case lock ───────────────────────────────
        self.locks
            .with_lock(&case_id, || {
                if self.store.contains(&case_id)? {
                    return Err(RegistryError::AlreadyExists {
                        case_id: case_id.clone(),
                    });
                }
                self.store.insert(record)
            })
            .map_err(|e| {
                warn!(case_id = %case_id, error = %e, "create lost at commit");
                e
            })?;

        info!(case_id = %case_id, author = %author, "case created");

        // ── Step 5: Publish ──────────────────────────────────────────────────
        self.events.publish(&PublishedEvent::now(DomainEvent::CaseCreated {
            case_id,
            author: author.clone(),
        }));

        Ok(handle)
    }

    /// Record an attested decryption of a case's diagnosis.
    ///
    /// Any caller may verify any case; `caller` is recorded in logs only.
    ///
    /// # Pipeline
    ///
    /// 1. Fetch the record (`NotFound`)
    /// 2. Reject if already verified (`AlreadyVerified`)
    /// 3. Check the attestation against the stored handle (outside the lock)
    /// 4. Decode the cleartext as a `u32` (`MalformedInput`)
    /// 5. Under the case lock: re-check not-yet-verified, write value + flag
    /// 6. Publish `DiagnosisVerified`
    ///
    /// Returns the recorded value. On error the record is unchanged.
    pub fn verify(&self, request: VerifyRequest, caller: &Author) -> RegistryResult<u32> {
        let case_id = request.case_id;

        debug!(case_id = %case_id, caller = %caller, "verify starting");

        // ── Steps 1 & 2: Existence and state guards ──────────────────────────
        let record = self.store.get(&case_id)?;
        if record.is_verified {
            warn!(case_id = %case_id, "verify rejected: already verified");
            return Err(RegistryError::AlreadyVerified { case_id });
        }

        // ── Step 3: Attestation (outside the lock) ───────────────────────────
        self.attestations
            .verify(&record.ciphertext_handle, &request.claimed_cleartext, &request.proof)
            .map_err(|e| {
                warn!(case_id = %case_id, error = %e, "attestation rejected");
                e
            })?;

        // ── Step 4: Decode ───────────────────────────────────────────────────
        let value = decode_cleartext(&request.claimed_cleartext)?;

        // ── Step 5: Commit under the case lock ───────────────────────────────
        self.locks.with_lock(&case_id, || {
            if self.store.get(&case_id)?.is_verified {
                return Err(RegistryError::AlreadyVerified {
                    case_id: case_id.clone(),
                });
            }
            self.store.update(&case_id, &mut |case: &mut MedicalCase| {
                case.decrypted_value = value;
                case.is_verified = true;
            })
        })?;

        info!(case_id = %case_id, caller = %caller, "diagnosis verified");

        // ── Step 6: Publish ──────────────────────────────────────────────────
        self.events
            .publish(&PublishedEvent::now(DomainEvent::DiagnosisVerified { case_id, value }));

        Ok(value)
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    /// Public view of a case.
    pub fn get_case(&self, case_id: &CaseId) -> RegistryResult<CaseView> {
        Ok(self.store.get(case_id)?.view())
    }

    /// The ciphertext handle stored for a case.
    pub fn get_ciphertext_handle(&self, case_id: &CaseId) -> RegistryResult<CiphertextHandle> {
        Ok(self.store.get(case_id)?.ciphertext_handle)
    }

    /// Every case id ever created, in creation order.
    pub fn list_case_ids(&self) -> RegistryResult<Vec<CaseId>> {
        self.store.list()
    }

    /// Lifecycle state of a case.
    pub fn case_status(&self, case_id: &CaseId) -> RegistryResult<CaseStatus> {
        Ok(self.store.get(case_id)?.status())
    }

    /// Number of cases created so far.
    pub fn case_count(&self) -> RegistryResult<usize> {
        self.store.count()
    }

    /// Liveness probe.
    pub fn is_available(&self) -> bool {
        true
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use medcase_contracts::{
        authority::AdmissionContext,
        case::{Author, CaseId, CaseStatus, CiphertextHandle, NewCase, PatientId, VerifyRequest},
        error::{RegistryError, RegistryResult},
        event::{DomainEvent, PublishedEvent},
    };

    use crate::memory::InMemoryCaseStore;
    use crate::traits::{AttestationAuthority, CaseStore, CiphertextAuthority, EventSink};

    use super::{decode_cleartext, CaseRegistry};

    const REGISTRY: &str = "test-registry";

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// Accepts any ciphertext whose proof is `b"ok"`; the handle is the
    /// ciphertext rendered as UTF-8. Records every grant.
    #[derive(Default)]
    struct MockCiphertexts {
        admitted: Mutex<u32>,
        allowed: Mutex<HashMap<String, HashSet<String>>>,
        public: Mutex<HashSet<String>>,
        delay: Option<Duration>,
    }

    impl MockCiphertexts {
        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::default()
            }
        }
    }

    impl CiphertextAuthority for MockCiphertexts {
        fn admit(
            &self,
            ciphertext: &[u8],
            proof: &[u8],
            _context: &AdmissionContext,
        ) -> RegistryResult<CiphertextHandle> {
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            *self.admitted.lock().unwrap() += 1;
            if proof != b"ok" {
                return Err(RegistryError::InvalidCiphertext {
                    reason: "bad input proof".to_string(),
                });
            }
            Ok(CiphertextHandle(String::from_utf8_lossy(ciphertext).into_owned()))
        }

        fn allow(&self, handle: &CiphertextHandle, principal: &str) -> RegistryResult<()> {
            self.allowed
                .lock()
                .unwrap()
                .entry(handle.0.clone())
                .or_default()
                .insert(principal.to_string());
            Ok(())
        }

        fn make_publicly_decryptable(&self, handle: &CiphertextHandle) -> RegistryResult<()> {
            self.public.lock().unwrap().insert(handle.0.clone());
            Ok(())
        }
    }

    /// Proof format: `<handle>|<cleartext bytes>`.
    #[derive(Default)]
    struct MockAttestations {
        delay: Option<Duration>,
    }

    impl MockAttestations {
        fn slow(delay: Duration) -> Self {
            Self { delay: Some(delay) }
        }
    }

    fn attest(handle: &str, cleartext: &[u8]) -> Vec<u8> {
        let mut proof = format!("{handle}|").into_bytes();
        proof.extend_from_slice(cleartext);
        proof
    }

    impl AttestationAuthority for MockAttestations {
        fn verify(
            &self,
            handle: &CiphertextHandle,
            cleartext: &[u8],
            proof: &[u8],
        ) -> RegistryResult<()> {
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            if proof == attest(handle.as_str(), cleartext).as_slice() {
                Ok(())
            } else {
                Err(RegistryError::InvalidAttestation {
                    reason: "proof does not cover handle and cleartext".to_string(),
                })
            }
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<DomainEvent>>,
    }

    impl EventSink for RecordingSink {
        fn publish(&self, event: &PublishedEvent) {
            self.events.lock().unwrap().push(event.event.clone());
        }
    }

    struct Harness {
        registry: CaseRegistry,
        store: Arc<InMemoryCaseStore>,
        ciphertexts: Arc<MockCiphertexts>,
        sink: Arc<RecordingSink>,
    }

    fn harness_with(ciphertexts: MockCiphertexts, attestations: MockAttestations) -> Harness {
        let store = Arc::new(InMemoryCaseStore::new());
        let ciphertexts = Arc::new(ciphertexts);
        let sink = Arc::new(RecordingSink::default());
        let registry = CaseRegistry::new(
            REGISTRY,
            store.clone(),
            ciphertexts.clone(),
            Arc::new(attestations),
            sink.clone(),
        );
        Harness {
            registry,
            store,
            ciphertexts,
            sink,
        }
    }

    fn harness() -> Harness {
        harness_with(MockCiphertexts::default(), MockAttestations::default())
    }

    fn new_case(id: &str, ciphertext: &str) -> NewCase {
        NewCase {
            case_id: CaseId::new(id),
            patient_id: PatientId::new("p1"),
            ciphertext: ciphertext.as_bytes().to_vec(),
            proof: b"ok".to_vec(),
            numeric_case_identifier: 42,
            medical_history: "history".to_string(),
        }
    }

    fn verify_request(id: &str, handle: &str, value: u32) -> VerifyRequest {
        let cleartext = value.to_be_bytes().to_vec();
        VerifyRequest {
            case_id: CaseId::new(id),
            proof: attest(handle, &cleartext),
            claimed_cleartext: cleartext,
        }
    }

    fn doctor() -> Author {
        Author::new("doctorX")
    }

    // ── Test cases ────────────────────────────────────────────────────────────

    /// create → verify → second verify, checking the view at every stage.
    #[test]
    fn test_end_to_end_lifecycle() {
        let h = harness();

        let handle = h.registry.create(new_case("case1", "ct-1"), &doctor()).unwrap();
        let view = h.registry.get_case(&CaseId::new("case1")).unwrap();
        assert!(!view.is_verified);
        assert_eq!(view.decrypted_value, 0);
        assert_eq!(view.author, doctor());
        assert_eq!(view.numeric_case_identifier, 42);

        let value = h
            .registry
            .verify(verify_request("case1", handle.as_str(), 7), &doctor())
            .unwrap();
        assert_eq!(value, 7);

        let view = h.registry.get_case(&CaseId::new("case1")).unwrap();
        assert!(view.is_verified);
        assert_eq!(view.decrypted_value, 7);

        let err = h
            .registry
            .verify(verify_request("case1", handle.as_str(), 9), &doctor())
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyVerified { .. }));
        assert_eq!(h.registry.get_case(&CaseId::new("case1")).unwrap().decrypted_value, 7);

        let events = h.sink.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                DomainEvent::CaseCreated {
                    case_id: CaseId::new("case1"),
                    author: doctor(),
                },
                DomainEvent::DiagnosisVerified {
                    case_id: CaseId::new("case1"),
                    value: 7,
                },
            ]
        );
    }

    /// A second create with the same id fails before admission and leaves the
    /// first record unchanged.
    #[test]
    fn test_duplicate_create_rejected() {
        let h = harness();
        h.registry.create(new_case("dup", "ct-first"), &doctor()).unwrap();

        let mut second = new_case("dup", "ct-second");
        second.medical_history = "overwritten".to_string();
        let err = h.registry.create(second, &Author::new("someone")).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists { .. }));

        // The early guard fired: only the first ciphertext was admitted.
        assert_eq!(*h.ciphertexts.admitted.lock().unwrap(), 1);

        let stored = h.store.get(&CaseId::new("dup")).unwrap();
        assert_eq!(stored.medical_history, "history");
        assert_eq!(stored.author, doctor());
        assert_eq!(stored.ciphertext_handle.as_str(), "ct-first");
        assert_eq!(h.sink.events.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_ciphertext_leaves_no_record() {
        let h = harness();
        let mut request = new_case("bad", "ct");
        request.proof = b"forged".to_vec();

        let err = h.registry.create(request, &doctor()).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidCiphertext { .. }));

        assert!(h.registry.list_case_ids().unwrap().is_empty());
        assert!(matches!(
            h.registry.get_case(&CaseId::new("bad")),
            Err(RegistryError::NotFound { .. })
        ));
        assert!(h.sink.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_case_is_not_found_everywhere() {
        let h = harness();
        let ghost = CaseId::new("ghost");

        assert!(matches!(
            h.registry.verify(verify_request("ghost", "x", 1), &doctor()),
            Err(RegistryError::NotFound { .. })
        ));
        assert!(matches!(
            h.registry.get_case(&ghost),
            Err(RegistryError::NotFound { .. })
        ));
        assert!(matches!(
            h.registry.get_ciphertext_handle(&ghost),
            Err(RegistryError::NotFound { .. })
        ));
        assert!(matches!(
            h.registry.case_status(&ghost),
            Err(RegistryError::NotFound { .. })
        ));

        assert!(h.registry.list_case_ids().unwrap().is_empty());
        assert!(h.sink.events.lock().unwrap().is_empty());
    }

    /// An attestation for a different handle must not verify this case.
    #[test]
    fn test_attestation_bound_to_stored_handle() {
        let h = harness();
        h.registry.create(new_case("a", "ct-a"), &doctor()).unwrap();
        let other = h.registry.create(new_case("b", "ct-b"), &doctor()).unwrap();

        let err = h
            .registry
            .verify(verify_request("a", other.as_str(), 3), &doctor())
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidAttestation { .. }));

        let view = h.registry.get_case(&CaseId::new("a")).unwrap();
        assert!(!view.is_verified);
        assert_eq!(view.decrypted_value, 0);
    }

    /// A proof over different cleartext bytes is rejected.
    #[test]
    fn test_attestation_bound_to_cleartext() {
        let h = harness();
        let handle = h.registry.create(new_case("a", "ct-a"), &doctor()).unwrap();

        let mut request = verify_request("a", handle.as_str(), 3);
        request.claimed_cleartext = 4u32.to_be_bytes().to_vec();

        assert!(matches!(
            h.registry.verify(request, &doctor()),
            Err(RegistryError::InvalidAttestation { .. })
        ));
        assert_eq!(h.registry.case_status(&CaseId::new("a")).unwrap(), CaseStatus::Created);
    }

    /// An attested but undecodable cleartext fails the whole call.
    #[test]
    fn test_malformed_cleartext_no_partial_write() {
        let h = harness();
        let handle = h.registry.create(new_case("a", "ct-a"), &doctor()).unwrap();

        let cleartext = vec![0u8, 1, 2];
        let request = VerifyRequest {
            case_id: CaseId::new("a"),
            proof: attest(handle.as_str(), &cleartext),
            claimed_cleartext: cleartext,
        };

        assert!(matches!(
            h.registry.verify(request, &doctor()),
            Err(RegistryError::MalformedInput { .. })
        ));
        let view = h.registry.get_case(&CaseId::new("a")).unwrap();
        assert!(!view.is_verified);
        assert_eq!(h.sink.events.lock().unwrap().len(), 1);
    }

    /// Verification is permissionless: a caller other than the author may
    /// verify a case.
    #[test]
    fn test_any_caller_may_verify() {
        let h = harness();
        let handle = h.registry.create(new_case("a", "ct-a"), &doctor()).unwrap();

        let stranger = Author::new("unrelated-caller");
        h.registry
            .verify(verify_request("a", handle.as_str(), 11), &stranger)
            .unwrap();

        let view = h.registry.get_case(&CaseId::new("a")).unwrap();
        assert_eq!(view.decrypted_value, 11);
        assert_eq!(view.author, doctor());
    }

    /// Creation grants the registry access and marks the handle publicly
    /// decryptable before any review step.
    #[test]
    fn test_create_grants_access_and_disclosure() {
        let h = harness();
        let handle = h.registry.create(new_case("a", "ct-a"), &doctor()).unwrap();

        let allowed = h.ciphertexts.allowed.lock().unwrap();
        assert!(allowed[handle.as_str()].contains(REGISTRY));
        assert!(h.ciphertexts.public.lock().unwrap().contains(handle.as_str()));
        assert_eq!(h.registry.principal(), REGISTRY);
    }

    #[test]
    fn test_enumeration_order_survives_verification() {
        let h = harness();
        let mut handles = Vec::new();
        for id in ["A", "B", "C"] {
            handles.push(h.registry.create(new_case(id, &format!("ct-{id}")), &doctor()).unwrap());
        }

        h.registry
            .verify(verify_request("B", handles[1].as_str(), 1), &doctor())
            .unwrap();

        let ids: Vec<String> = h
            .registry
            .list_case_ids()
            .unwrap()
            .into_iter()
            .map(|c| c.0)
            .collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(h.registry.case_count().unwrap(), 3);
    }

    #[test]
    fn test_get_ciphertext_handle_returns_admitted_handle() {
        let h = harness();
        let handle = h.registry.create(new_case("a", "ct-a"), &doctor()).unwrap();
        assert_eq!(h.registry.get_ciphertext_handle(&CaseId::new("a")).unwrap(), handle);
        assert!(h.registry.is_available());
    }

    /// Concurrent creators of one id: exactly one wins, one index entry.
    #[test]
    fn test_concurrent_create_single_winner() {
        let h = harness_with(
            MockCiphertexts::slow(Duration::from_millis(5)),
            MockAttestations::default(),
        );

        let results: Vec<RegistryResult<CiphertextHandle>> = std::thread::scope(|s| {
            let workers: Vec<_> = (0..8)
                .map(|i| {
                    let registry = &h.registry;
                    s.spawn(move || {
                        registry.create(new_case("race", &format!("ct-{i}")), &doctor())
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RegistryError::AlreadyExists { .. })));

        assert_eq!(h.registry.list_case_ids().unwrap(), vec![CaseId::new("race")]);
        assert_eq!(h.sink.events.lock().unwrap().len(), 1);
    }

    /// Concurrent verifiers of one case: exactly one value is recorded.
    ///
    /// Attestation is slow, so every verifier passes the early
    /// not-yet-verified guard before anyone commits; only the re-check under
    /// the case lock keeps the losers out.
    #[test]
    fn test_concurrent_verify_single_winner() {
        let h = harness_with(
            MockCiphertexts::default(),
            MockAttestations::slow(Duration::from_millis(20)),
        );
        let handle = h.registry.create(new_case("v", "ct-v"), &doctor()).unwrap();

        let results: Vec<RegistryResult<u32>> = std::thread::scope(|s| {
            let workers: Vec<_> = (1..=8u32)
                .map(|value| {
                    let registry = &h.registry;
                    let handle = handle.clone();
                    s.spawn(move || {
                        registry.verify(verify_request("v", handle.as_str(), value), &doctor())
                    })
                })
                .collect();
            workers.into_iter().map(|w| w.join().unwrap()).collect()
        });

        let winners: Vec<u32> = results.iter().filter_map(|r| r.as_ref().ok().copied()).collect();
        assert_eq!(winners.len(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| matches!(e, RegistryError::AlreadyVerified { .. })));

        let view = h.registry.get_case(&CaseId::new("v")).unwrap();
        assert_eq!(view.decrypted_value, winners[0]);

        let verified_events = h
            .sink
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, DomainEvent::DiagnosisVerified { .. }))
            .count();
        assert_eq!(verified_events, 1);
    }

    #[test]
    fn test_decode_cleartext() {
        assert_eq!(decode_cleartext(&[0, 0, 0, 7]).unwrap(), 7);
        assert_eq!(decode_cleartext(&[0xff; 4]).unwrap(), u32::MAX);
        assert!(matches!(
            decode_cleartext(&[0, 0, 0, 0, 7]),
            Err(RegistryError::MalformedInput { .. })
        ));
        assert!(matches!(
            decode_cleartext(&[]),
            Err(RegistryError::MalformedInput { .. })
        ));
    }
}
