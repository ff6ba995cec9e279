//! Core trait definitions for the MEDCASE registry.
//!
//! These four traits define the complete trust boundary:
//!
//! - `CaseStore`: the sole shared mutable state (keyed map + ordered index)
//! - `CiphertextAuthority`: external, admits ciphertexts and grants access to handles
//! - `AttestationAuthority`: external, checks signed decryption statements
//! - `EventSink`: outbound, receives committed domain events
//!
//! The registry wires them together. Nothing in the registry reaches for
//! global state; every collaborator is injected at construction.

use medcase_contracts::{
    authority::AdmissionContext,
    case::{CaseId, CiphertextHandle, MedicalCase},
    error::RegistryResult,
    event::PublishedEvent,
};

/// Durable keyed map of case id → record, plus an append-only ordered index.
///
/// Implementations must make `insert` atomic: either both the map entry and
/// the index entry land, or neither does. Records are never removed.
pub trait CaseStore: Send + Sync {
    /// Store `record` under its `case_id` and append the id to the index.
    ///
    /// Fails with `AlreadyExists` if the id is already present.
    fn insert(&self, record: MedicalCase) -> RegistryResult<()>;

    /// Return a copy of the record for `case_id`, or `NotFound`.
    fn get(&self, case_id: &CaseId) -> RegistryResult<MedicalCase>;

    /// Apply `mutator` to the stored record in place, or fail with `NotFound`.
    ///
    /// The store does not judge legality; the caller must already have
    /// established that the mutation is a permitted transition.
    fn update(
        &self,
        case_id: &CaseId,
        mutator: &mut dyn FnMut(&mut MedicalCase),
    ) -> RegistryResult<()>;

    /// All ids ever inserted, in insertion order.
    fn list(&self) -> RegistryResult<Vec<CaseId>>;

    /// Return true if `case_id` has been inserted.
    fn contains(&self, case_id: &CaseId) -> RegistryResult<bool>;

    /// Number of stored cases.
    fn count(&self) -> RegistryResult<usize>;
}

/// The encryption co-processor's admission interface.
///
/// Implementations are **external** to the registry and may perform slow,
/// blocking network calls. The registry never holds a per-case lock while
/// calling into this trait.
pub trait CiphertextAuthority: Send + Sync {
    /// Validate `ciphertext` against `proof` for the given context.
    ///
    /// Must confirm the ciphertext is well-formed and bound to `context`
    /// before returning a handle. Fails with `InvalidCiphertext`.
    fn admit(
        &self,
        ciphertext: &[u8],
        proof: &[u8],
        context: &AdmissionContext,
    ) -> RegistryResult<CiphertextHandle>;

    /// Grant `principal` permission to operate on `handle`.
    fn allow(&self, handle: &CiphertextHandle, principal: &str) -> RegistryResult<()>;

    /// Mark `handle` as eligible for decryption by any requester.
    fn make_publicly_decryptable(&self, handle: &CiphertextHandle) -> RegistryResult<()>;
}

/// The decryption authority's attestation interface.
pub trait AttestationAuthority: Send + Sync {
    /// Check that `proof` is a valid signed statement that decrypting
    /// `handle` yields exactly `cleartext`.
    ///
    /// Any mismatch in handle, byte encoding, or signature set fails with
    /// `InvalidAttestation`.
    fn verify(
        &self,
        handle: &CiphertextHandle,
        cleartext: &[u8],
        proof: &[u8],
    ) -> RegistryResult<()>;
}

/// Receiver of committed domain events.
///
/// `publish` is infallible by signature: a subscriber can never fail a
/// transition that has already been committed. Implementations must not
/// block.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn publish(&self, event: &PublishedEvent);
}
