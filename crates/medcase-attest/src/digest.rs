//! Domain-separated SHA-256 constructions shared by the reference authorities.
//!
//! Every variable-length field is absorbed with an 8-byte little-endian
//! length prefix, so no two distinct field sequences hash the same input.

use sha2::{Digest, Sha256};

use medcase_contracts::{authority::AdmissionContext, case::CiphertextHandle};

const INPUT_DOMAIN: &[u8] = b"medcase/input";
const HANDLE_DOMAIN: &[u8] = b"medcase/handle";
const DECRYPTION_DOMAIN: &[u8] = b"medcase/decryption";
const MASK_DOMAIN: &[u8] = b"medcase/mask";

fn absorb(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// The input proof that binds `ciphertext` to `context`.
pub fn input_proof(admission_key: &str, context: &AdmissionContext, ciphertext: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    absorb(&mut hasher, INPUT_DOMAIN);
    absorb(&mut hasher, admission_key.as_bytes());
    absorb(&mut hasher, context.registry.as_bytes());
    absorb(&mut hasher, context.submitter.0.as_bytes());
    absorb(&mut hasher, ciphertext);
    hasher.finalize().into()
}

/// Derive the handle for a ciphertext admitted to `registry`.
pub fn handle_for(registry: &str, ciphertext: &[u8]) -> CiphertextHandle {
    let mut hasher = Sha256::new();
    absorb(&mut hasher, HANDLE_DOMAIN);
    absorb(&mut hasher, registry.as_bytes());
    absorb(&mut hasher, ciphertext);
    CiphertextHandle(hex::encode(hasher.finalize()))
}

/// Digest of the statement "decrypting `handles` yields `cleartext`".
pub fn statement_digest(handles: &[String], cleartext: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    absorb(&mut hasher, DECRYPTION_DOMAIN);
    hasher.update((handles.len() as u64).to_le_bytes());
    for handle in handles {
        absorb(&mut hasher, handle.as_bytes());
    }
    absorb(&mut hasher, cleartext);
    hasher.finalize().into()
}

/// One signer's share over a statement digest, as lowercase hex.
pub fn sign_statement(signer_key: &str, digest: &[u8; 32]) -> String {
    let mut hasher = Sha256::new();
    absorb(&mut hasher, signer_key.as_bytes());
    hasher.update(digest);
    hex::encode(hasher.finalize())
}

/// Four-byte mask the local co-processor XORs a value with.
pub fn value_mask(encryption_key: &str, nonce: &[u8]) -> [u8; 4] {
    let mut hasher = Sha256::new();
    absorb(&mut hasher, MASK_DOMAIN);
    absorb(&mut hasher, encryption_key.as_bytes());
    absorb(&mut hasher, nonce);
    let digest = hasher.finalize();
    [digest[0], digest[1], digest[2], digest[3]]
}
