//! # medcase-attest
//!
//! Reference authorities for the MEDCASE registry.
//!
//! This crate provides:
//!
//! - [`DigestCiphertextAuthority`]: a `CiphertextAuthority` that admits
//!   ciphertexts carrying a keyed input proof bound to (registry, submitter)
//! - [`ThresholdAttestationAuthority`]: an `AttestationAuthority` that
//!   accepts a decryption proof only when a threshold of configured signers
//!   vouch for exactly (handle, cleartext bytes)
//! - [`LocalCoprocessor`]: a simulator producing inputs and attested
//!   decryptions the two authorities accept
//! - [`AuthorityConfig`]: TOML configuration shared by all three
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use medcase_attest::{AuthorityConfig, DigestCiphertextAuthority};
//!
//! let config = AuthorityConfig::from_file(Path::new("config/authority.toml"))?;
//! let ciphertexts = DigestCiphertextAuthority::new(&config);
//! ```

pub mod attestation;
pub mod ciphertext;
pub mod config;
pub mod coprocessor;
pub mod digest;

pub use attestation::{DecryptionProof, SignatureShare, ThresholdAttestationAuthority};
pub use ciphertext::DigestCiphertextAuthority;
pub use config::{AuthorityConfig, SignerConfig};
pub use coprocessor::{EncryptedInput, LocalCoprocessor, PublicDecryption};

#[cfg(test)]
pub(crate) fn test_config() -> AuthorityConfig {
    AuthorityConfig::from_toml_str(
        r#"
            registry = "test-registry"
            admission_key = "test-admission-key"
            encryption_key = "test-encryption-key"
            threshold = 2

            [[signers]]
            id = "node-a"
            key = "key-a"

            [[signers]]
            id = "node-b"
            key = "key-b"

            [[signers]]
            id = "node-c"
            key = "key-c"
        "#,
    )
    .unwrap()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
