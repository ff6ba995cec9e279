//! Error taxonomy for the MEDCASE registry.
//!
//! Every failure is synchronous and reported to the caller; nothing is
//! retried internally. A failed operation never leaves a partial write.

use thiserror::Error;

use crate::case::{CaseId, CiphertextHandle};

/// The unified error type for the MEDCASE crates.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A case with this id has already been created.
    #[error("case '{case_id}' already exists")]
    AlreadyExists { case_id: CaseId },

    /// No case with this id has ever been created.
    #[error("case '{case_id}' not found")]
    NotFound { case_id: CaseId },

    /// The ciphertext authority refused to admit the submitted ciphertext.
    #[error("invalid ciphertext: {reason}")]
    InvalidCiphertext { reason: String },

    /// The attestation does not bind the case's handle to the claimed cleartext.
    #[error("invalid attestation: {reason}")]
    InvalidAttestation { reason: String },

    /// The case's diagnosis has already been verified; the value is final.
    #[error("case '{case_id}' is already verified")]
    AlreadyVerified { case_id: CaseId },

    /// The claimed cleartext is not a valid 32-bit unsigned integer encoding.
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    /// The decryption authority will not decrypt a handle that was never
    /// marked for public disclosure.
    #[error("handle '{handle}' is not eligible for disclosure")]
    DisclosureDenied { handle: CiphertextHandle },

    /// Authority configuration is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Shared state could not be accessed (e.g. a poisoned lock).
    #[error("storage failure: {reason}")]
    StorageFailure { reason: String },
}

/// Convenience alias used throughout the MEDCASE crates.
pub type RegistryResult<T> = Result<T, RegistryError>;
