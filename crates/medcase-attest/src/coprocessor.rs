//! Local stand-in for the encryption/decryption co-processor.
//!
//! Produces ciphertexts and input proofs that `DigestCiphertextAuthority`
//! admits, and attested public decryptions that
//! `ThresholdAttestationAuthority` verifies. Decryption is refused for any
//! handle the admission authority has not marked publicly decryptable.
//!
//! For demos and tests only: the masking is not encryption.

use std::sync::Arc;

use tracing::{debug, warn};

use medcase_contracts::{
    authority::AdmissionContext,
    case::CiphertextHandle,
    error::{RegistryError, RegistryResult},
};

use crate::{
    attestation::ThresholdAttestationAuthority,
    ciphertext::{DigestCiphertextAuthority, CIPHERTEXT_LEN, CIPHERTEXT_TAG_U32, NONCE_LEN},
    config::AuthorityConfig,
    digest::{input_proof, value_mask},
};

/// An encrypted input ready for submission.
#[derive(Debug, Clone)]
pub struct EncryptedInput {
    pub ciphertext: Vec<u8>,
    pub proof: Vec<u8>,
}

/// An attested public decryption.
#[derive(Debug, Clone)]
pub struct PublicDecryption {
    /// Four-byte big-endian cleartext.
    pub cleartext: Vec<u8>,
    /// Decryption proof over (handle, cleartext).
    pub proof: Vec<u8>,
}

/// Simulated co-processor sharing key material with the reference authorities.
pub struct LocalCoprocessor {
    admission_key: String,
    encryption_key: String,
    ciphertexts: Arc<DigestCiphertextAuthority>,
    attestations: Arc<ThresholdAttestationAuthority>,
}

impl LocalCoprocessor {
    /// Wire a co-processor to the authorities built from the same `config`.
    pub fn new(
        config: &AuthorityConfig,
        ciphertexts: Arc<DigestCiphertextAuthority>,
        attestations: Arc<ThresholdAttestationAuthority>,
    ) -> Self {
        Self {
            admission_key: config.admission_key.clone(),
            encryption_key: config.encryption_key.clone(),
            ciphertexts,
            attestations,
        }
    }

    /// Encrypt `value` for submission under `context`.
    pub fn encrypt_u32(&self, value: u32, context: &AdmissionContext) -> EncryptedInput {
        let nonce = uuid::Uuid::new_v4().into_bytes();
        let mask = value_mask(&self.encryption_key, &nonce);

        let mut ciphertext = Vec::with_capacity(CIPHERTEXT_LEN);
        ciphertext.push(CIPHERTEXT_TAG_U32);
        ciphertext.extend_from_slice(&nonce);
        ciphertext.extend(value.to_be_bytes().iter().zip(mask).map(|(b, m)| b ^ m));

        let proof = input_proof(&self.admission_key, context, &ciphertext).to_vec();
        debug!(submitter = %context.submitter, "input encrypted");
        EncryptedInput { ciphertext, proof }
    }

    /// Decrypt an admitted handle and attest the result.
    ///
    /// Fails with `DisclosureDenied` unless the handle was marked publicly
    /// decryptable.
    pub fn public_decrypt(&self, handle: &CiphertextHandle) -> RegistryResult<PublicDecryption> {
        if !self.ciphertexts.is_publicly_decryptable(handle) {
            warn!(handle = %handle, "public decryption refused");
            return Err(RegistryError::DisclosureDenied {
                handle: handle.clone(),
            });
        }

        let ciphertext = self.ciphertexts.ciphertext(handle)?;
        let nonce = &ciphertext[1..1 + NONCE_LEN];
        let mask = value_mask(&self.encryption_key, nonce);

        let mut cleartext = [0u8; 4];
        for (i, (byte, m)) in ciphertext[1 + NONCE_LEN..].iter().zip(mask).enumerate() {
            cleartext[i] = byte ^ m;
        }

        let proof = self.attestations.sign_decryption(handle, &cleartext)?;
        debug!(handle = %handle, "public decryption attested");
        Ok(PublicDecryption {
            cleartext: cleartext.to_vec(),
            proof,
        })
    }
}
