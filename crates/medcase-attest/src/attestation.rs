//! Threshold attestation authority.
//!
//! `ThresholdAttestationAuthority` implements `AttestationAuthority`.
//! A decryption proof is a JSON document:
//!
//! ```json
//! { "handles": ["<hex>"], "cleartexts": "<hex>",
//!   "signatures": [{ "signer": "kms-node-a", "signature": "<hex>" }] }
//! ```
//!
//! Verification runs in two phases:
//!
//! 1. **Binding**: the proof must cover exactly the case's handle and
//!    exactly the claimed cleartext bytes.
//! 2. **Signatures**: every share must come from a distinct, known signer
//!    and verify against the statement digest; at least `threshold` must.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use medcase_contracts::{
    case::CiphertextHandle,
    error::{RegistryError, RegistryResult},
};
use medcase_core::traits::AttestationAuthority;

use crate::{
    config::AuthorityConfig,
    digest::{sign_statement, statement_digest},
};

/// One signer's contribution to a decryption proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureShare {
    pub signer: String,
    pub signature: String,
}

/// Wire format of a decryption attestation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptionProof {
    /// Handles the statement covers, in order.
    pub handles: Vec<String>,
    /// The decrypted bytes, hex-encoded.
    pub cleartexts: String,
    pub signatures: Vec<SignatureShare>,
}

impl DecryptionProof {
    /// Decode a proof from its JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> RegistryResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| RegistryError::InvalidAttestation {
            reason: format!("undecodable proof: {}", e),
        })
    }

    /// Encode the proof as JSON bytes.
    pub fn to_bytes(&self) -> RegistryResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RegistryError::InvalidAttestation {
            reason: format!("cannot encode proof: {}", e),
        })
    }
}

fn reject(reason: impl Into<String>) -> RegistryError {
    RegistryError::InvalidAttestation {
        reason: reason.into(),
    }
}

/// Verifies decryption proofs against a configured signer set.
pub struct ThresholdAttestationAuthority {
    /// Signer id → key.
    signers: HashMap<String, String>,
    threshold: usize,
}

impl ThresholdAttestationAuthority {
    /// Build an authority from validated configuration.
    pub fn new(config: &AuthorityConfig) -> Self {
        Self {
            signers: config
                .signers
                .iter()
                .map(|s| (s.id.clone(), s.key.clone()))
                .collect(),
            threshold: config.threshold,
        }
    }

    /// Produce a proof, signed by every configured signer, that decrypting
    /// `handle` yields `cleartext`.
    pub fn sign_decryption(
        &self,
        handle: &CiphertextHandle,
        cleartext: &[u8],
    ) -> RegistryResult<Vec<u8>> {
        let handles = vec![handle.0.clone()];
        let digest = statement_digest(&handles, cleartext);

        let mut signatures: Vec<SignatureShare> = self
            .signers
            .iter()
            .map(|(id, key)| SignatureShare {
                signer: id.clone(),
                signature: sign_statement(key, &digest),
            })
            .collect();
        signatures.sort_by(|a, b| a.signer.cmp(&b.signer));

        DecryptionProof {
            handles,
            cleartexts: hex::encode(cleartext),
            signatures,
        }
        .to_bytes()
    }
}

impl AttestationAuthority for ThresholdAttestationAuthority {
    fn verify(
        &self,
        handle: &CiphertextHandle,
        cleartext: &[u8],
        proof: &[u8],
    ) -> RegistryResult<()> {
        let proof = DecryptionProof::from_bytes(proof)?;

        // ── Phase 1: Binding ──────────────────────────────────────────────────
        if proof.handles.len() != 1 || proof.handles[0] != handle.0 {
            warn!(handle = %handle, covered = ?proof.handles, "proof covers a different handle set");
            return Err(reject("proof does not cover exactly this handle"));
        }

        let attested = hex::decode(&proof.cleartexts)
            .map_err(|e| reject(format!("cleartexts are not valid hex: {}", e)))?;
        if attested != cleartext {
            warn!(handle = %handle, "proof attests different cleartext bytes");
            return Err(reject("attested cleartext does not match the claimed encoding"));
        }

        // ── Phase 2: Signatures ───────────────────────────────────────────────
        let digest = statement_digest(&proof.handles, &attested);
        let mut valid: HashSet<&str> = HashSet::new();

        for share in &proof.signatures {
            let key = self
                .signers
                .get(&share.signer)
                .ok_or_else(|| reject(format!("unknown signer '{}'", share.signer)))?;
            if !valid.insert(share.signer.as_str()) {
                return Err(reject(format!("duplicate share from signer '{}'", share.signer)));
            }
            if share.signature != sign_statement(key, &digest) {
                warn!(handle = %handle, signer = %share.signer, "signature share does not verify");
                return Err(reject(format!("bad signature from signer '{}'", share.signer)));
            }
        }

        if valid.len() < self.threshold {
            return Err(reject(format!(
                "{} valid signer(s), threshold is {}",
                valid.len(),
                self.threshold
            )));
        }

        debug!(handle = %handle, signers = valid.len(), "attestation verified");
        Ok(())
    }
}
