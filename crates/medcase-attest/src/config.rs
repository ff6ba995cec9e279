//! Authority configuration schema.
//!
//! An `AuthorityConfig` is deserialized from TOML and holds the key material
//! the reference authorities share: the admission key that input proofs are
//! bound with, and the signer set that attests decryptions.
//!
//! Example:
//! ```toml
//! registry = "medcase-registry"
//! admission_key = "input-binding-secret"
//! encryption_key = "coprocessor-secret"
//! threshold = 2
//!
//! [[signers]]
//! id = "kms-node-a"
//! key = "node-a-secret"
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use medcase_contracts::error::{RegistryError, RegistryResult};

/// One member of the decryption signer set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Stable signer identifier, carried in every signature share.
    pub id: String,
    /// Secret the signer keys its statement digests with.
    pub key: String,
}

/// The top-level structure deserialized from an authority TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityConfig {
    /// Principal name of the registry that ciphertexts are admitted for.
    pub registry: String,

    /// Secret binding input proofs to (registry, submitter, ciphertext).
    pub admission_key: String,

    /// Secret used by the local co-processor simulator to mask values.
    /// Real deployments never hand this to the registry.
    pub encryption_key: String,

    /// Minimum number of distinct valid signer shares an attestation needs.
    pub threshold: usize,

    /// The signer set. Ids must be unique.
    pub signers: Vec<SignerConfig>,
}

impl AuthorityConfig {
    /// Parse `s` as TOML and validate it.
    ///
    /// Returns `RegistryError::ConfigError` if the TOML is malformed, does
    /// not match the schema, or fails validation.
    pub fn from_toml_str(s: &str) -> RegistryResult<Self> {
        let config: AuthorityConfig = toml::from_str(s).map_err(|e| RegistryError::ConfigError {
            reason: format!("failed to parse authority TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as authority configuration.
    pub fn from_file(path: &Path) -> RegistryResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RegistryError::ConfigError {
            reason: format!("failed to read authority file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check the threshold against the signer set and reject duplicate ids.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.threshold == 0 {
            return Err(RegistryError::ConfigError {
                reason: "threshold must be at least 1".to_string(),
            });
        }
        if self.threshold > self.signers.len() {
            return Err(RegistryError::ConfigError {
                reason: format!(
                    "threshold {} exceeds signer count {}",
                    self.threshold,
                    self.signers.len()
                ),
            });
        }

        let mut seen = HashSet::new();
        for signer in &self.signers {
            if !seen.insert(signer.id.as_str()) {
                return Err(RegistryError::ConfigError {
                    reason: format!("duplicate signer id '{}'", signer.id),
                });
            }
        }
        Ok(())
    }
}
