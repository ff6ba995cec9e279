//! Types exchanged with the external encryption and decryption authorities.

use serde::{Deserialize, Serialize};

use crate::case::Author;

/// The context a submitted ciphertext must be bound to.
///
/// The ciphertext authority rejects an input proof produced for any other
/// (registry, submitter) pair, so a ciphertext lifted from one submission
/// cannot be replayed under a different identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionContext {
    /// Principal name of the registry that will operate on the handle.
    pub registry: String,
    /// The caller submitting the ciphertext.
    pub submitter: Author,
}

impl AdmissionContext {
    /// Build a context for `submitter` against the named registry.
    pub fn new(registry: impl Into<String>, submitter: Author) -> Self {
        Self {
            registry: registry.into(),
            submitter,
        }
    }
}
