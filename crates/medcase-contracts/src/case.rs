//! Case identity and record types.
//!
//! A `MedicalCase` is the unit the registry stores. Every field except
//! `decrypted_value` and `is_verified` is fixed at creation; those two are
//! written together, exactly once, when a decryption is attested.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-assigned primary key of a case.
///
/// Unique for the lifetime of the store: ids are never reused or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl CaseId {
    /// Construct a case id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque patient identifier. The registry never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(pub String);

impl PatientId {
    /// Construct a patient id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Opaque caller identity, supplied explicitly with every request.
///
/// Recorded as the `author` of a case at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author(pub String);

impl Author {
    /// Construct an author token from any string-like value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to an encrypted 32-bit value held by the ciphertext
/// authority.
///
/// Usable in later operations (disclosure, attestation) without exposing the
/// plaintext. The reference authority renders it as 64 lowercase hex chars.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CiphertextHandle(pub String);

impl CiphertextHandle {
    /// Borrow the handle as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CiphertextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a case. `Verified` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Admitted and stored; the diagnosis is still encrypted.
    Created,
    /// A decryption of the diagnosis has been attested and recorded.
    Verified,
}

/// The stored case record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalCase {
    /// Primary key.
    pub case_id: CaseId,
    /// Patient the case belongs to.
    pub patient_id: PatientId,
    /// Handle to the encrypted diagnosis.
    pub ciphertext_handle: CiphertextHandle,
    /// Caller-supplied secondary id.
    pub numeric_case_identifier: u64,
    /// Free-text history, stored as given.
    pub medical_history: String,
    /// Identity of the creating caller.
    pub author: Author,
    /// Wall-clock creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// The attested diagnosis. Zero until `is_verified` is true.
    pub decrypted_value: u32,
    /// Set once, false → true, when a decryption is attested.
    pub is_verified: bool,
}

impl MedicalCase {
    /// Current lifecycle state, derived from `is_verified`.
    pub fn status(&self) -> CaseStatus {
        if self.is_verified {
            CaseStatus::Verified
        } else {
            CaseStatus::Created
        }
    }

    /// Project the record onto the public query shape.
    pub fn view(&self) -> CaseView {
        CaseView {
            patient_id: self.patient_id.clone(),
            numeric_case_identifier: self.numeric_case_identifier,
            medical_history: self.medical_history.clone(),
            author: self.author.clone(),
            created_at: self.created_at,
            is_verified: self.is_verified,
            decrypted_value: self.decrypted_value,
        }
    }
}

/// Read-only projection returned by `getCase`.
///
/// The ciphertext handle is not included; see `get_ciphertext_handle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseView {
    pub patient_id: PatientId,
    pub numeric_case_identifier: u64,
    pub medical_history: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub is_verified: bool,
    pub decrypted_value: u32,
}

/// Everything a caller submits to open a case, minus their identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCase {
    pub case_id: CaseId,
    pub patient_id: PatientId,
    /// Raw ciphertext bytes as produced by the encryption co-processor.
    pub ciphertext: Vec<u8>,
    /// Input proof binding `ciphertext` to the submitting context.
    pub proof: Vec<u8>,
    pub numeric_case_identifier: u64,
    pub medical_history: String,
}

/// A request to record an attested decryption of a case's diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub case_id: CaseId,
    /// Cleartext encoding as produced by the decryption authority:
    /// a 4-byte big-endian unsigned integer.
    pub claimed_cleartext: Vec<u8>,
    /// Signed attestation over (handle, cleartext).
    pub proof: Vec<u8>,
}
