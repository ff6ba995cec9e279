//! Reference ciphertext admission authority.
//!
//! `DigestCiphertextAuthority` implements `CiphertextAuthority` for the
//! reference co-processor's wire format:
//!
//!   [tag: 1 byte = 0x04][nonce: 16 bytes][masked value: 4 bytes]
//!
//! A ciphertext is admitted only if its input proof was produced for exactly
//! this registry and submitter. Admitted handles carry an access list and a
//! public-disclosure flag.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use tracing::{debug, info, warn};

use medcase_contracts::{
    authority::AdmissionContext,
    case::CiphertextHandle,
    error::{RegistryError, RegistryResult},
};
use medcase_core::traits::CiphertextAuthority;

use crate::{
    config::AuthorityConfig,
    digest::{handle_for, input_proof},
};

/// Type tag of an encrypted 32-bit unsigned integer.
pub const CIPHERTEXT_TAG_U32: u8 = 0x04;
/// Length of the per-ciphertext nonce.
pub const NONCE_LEN: usize = 16;
/// Total length of a well-formed ciphertext.
pub const CIPHERTEXT_LEN: usize = 1 + NONCE_LEN + 4;

struct Admitted {
    ciphertext: Vec<u8>,
    allowed: HashSet<String>,
    public: bool,
}

fn poisoned<T>(e: PoisonError<T>) -> RegistryError {
    RegistryError::StorageFailure {
        reason: format!("ciphertext authority lock poisoned: {}", e),
    }
}

fn unknown_handle(handle: &CiphertextHandle) -> RegistryError {
    RegistryError::InvalidCiphertext {
        reason: format!("handle '{}' was never admitted", handle),
    }
}

/// Admission authority backed by keyed SHA-256 input proofs.
pub struct DigestCiphertextAuthority {
    registry: String,
    admission_key: String,
    admitted: RwLock<HashMap<CiphertextHandle, Admitted>>,
}

impl DigestCiphertextAuthority {
    /// Build an authority from validated configuration.
    pub fn new(config: &AuthorityConfig) -> Self {
        Self {
            registry: config.registry.clone(),
            admission_key: config.admission_key.clone(),
            admitted: RwLock::new(HashMap::new()),
        }
    }

    /// Return true if `principal` has been granted access to `handle`.
    pub fn is_allowed(&self, handle: &CiphertextHandle, principal: &str) -> bool {
        self.admitted
            .read()
            .map(|a| a.get(handle).is_some_and(|e| e.allowed.contains(principal)))
            .unwrap_or(false)
    }

    /// Return true if `handle` has been marked for public disclosure.
    pub fn is_publicly_decryptable(&self, handle: &CiphertextHandle) -> bool {
        self.admitted
            .read()
            .map(|a| a.get(handle).is_some_and(|e| e.public))
            .unwrap_or(false)
    }

    /// The raw ciphertext behind an admitted handle.
    pub fn ciphertext(&self, handle: &CiphertextHandle) -> RegistryResult<Vec<u8>> {
        let admitted = self.admitted.read().map_err(poisoned)?;
        admitted
            .get(handle)
            .map(|e| e.ciphertext.clone())
            .ok_or_else(|| unknown_handle(handle))
    }

    fn check_well_formed(ciphertext: &[u8]) -> RegistryResult<()> {
        if ciphertext.len() != CIPHERTEXT_LEN {
            return Err(RegistryError::InvalidCiphertext {
                reason: format!(
                    "expected {} bytes, got {}",
                    CIPHERTEXT_LEN,
                    ciphertext.len()
                ),
            });
        }
        if ciphertext[0] != CIPHERTEXT_TAG_U32 {
            return Err(RegistryError::InvalidCiphertext {
                reason: format!("unsupported type tag 0x{:02x}", ciphertext[0]),
            });
        }
        Ok(())
    }
}

impl CiphertextAuthority for DigestCiphertextAuthority {
    fn admit(
        &self,
        ciphertext: &[u8],
        proof: &[u8],
        context: &AdmissionContext,
    ) -> RegistryResult<CiphertextHandle> {
        if context.registry != self.registry {
            warn!(
                expected = %self.registry,
                got = %context.registry,
                "admission for foreign registry refused"
            );
            return Err(RegistryError::InvalidCiphertext {
                reason: format!("ciphertext is not admitted for registry '{}'", context.registry),
            });
        }

        Self::check_well_formed(ciphertext)?;

        let expected = input_proof(&self.admission_key, context, ciphertext);
        if proof != expected.as_slice() {
            warn!(submitter = %context.submitter, "input proof does not bind ciphertext to submitter");
            return Err(RegistryError::InvalidCiphertext {
                reason: "input proof does not match ciphertext and submitting context".to_string(),
            });
        }

        let handle = handle_for(&self.registry, ciphertext);
        let mut admitted = self.admitted.write().map_err(poisoned)?;
        admitted.entry(handle.clone()).or_insert_with(|| Admitted {
            ciphertext: ciphertext.to_vec(),
            allowed: HashSet::new(),
            public: false,
        });

        debug!(handle = %handle, submitter = %context.submitter, "ciphertext admitted");
        Ok(handle)
    }

    fn allow(&self, handle: &CiphertextHandle, principal: &str) -> RegistryResult<()> {
        let mut admitted = self.admitted.write().map_err(poisoned)?;
        let entry = admitted.get_mut(handle).ok_or_else(|| unknown_handle(handle))?;
        entry.allowed.insert(principal.to_string());
        debug!(handle = %handle, principal, "access granted");
        Ok(())
    }

    fn make_publicly_decryptable(&self, handle: &CiphertextHandle) -> RegistryResult<()> {
        let mut admitted = self.admitted.write().map_err(poisoned)?;
        let entry = admitted.get_mut(handle).ok_or_else(|| unknown_handle(handle))?;
        entry.public = true;
        info!(handle = %handle, "handle marked publicly decryptable");
        Ok(())
    }
}
