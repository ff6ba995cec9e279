//! A fully wired clinic: registry, reference authorities, co-processor
//! simulator, audit trail, and event bus.

use std::sync::Arc;

use tracing::debug;

use medcase_attest::{
    AuthorityConfig, DigestCiphertextAuthority, LocalCoprocessor, ThresholdAttestationAuthority,
};
use medcase_audit::{AuditTrail, EventBus, FanoutSink};
use medcase_contracts::{
    authority::AdmissionContext,
    case::{Author, CaseId, CiphertextHandle, NewCase, VerifyRequest},
    error::RegistryResult,
};
use medcase_core::{CaseRegistry, InMemoryCaseStore};

use crate::mock_data::MockIntake;

/// Embedded reference authority configuration.
pub const DEFAULT_AUTHORITY_CONFIG: &str = include_str!("../config/authority.toml");

/// Every component of the reference runtime, wired together.
///
/// The authorities, trail, and bus are kept behind `Arc`s so the scenarios
/// can inspect them after handing clones to the registry.
pub struct Clinic {
    pub registry: CaseRegistry,
    pub ciphertexts: Arc<DigestCiphertextAuthority>,
    pub attestations: Arc<ThresholdAttestationAuthority>,
    pub coprocessor: LocalCoprocessor,
    pub trail: Arc<AuditTrail>,
    pub bus: Arc<EventBus>,
}

impl Clinic {
    /// Wire a clinic from validated configuration.
    pub fn new(config: &AuthorityConfig) -> Self {
        let ciphertexts = Arc::new(DigestCiphertextAuthority::new(config));
        let attestations = Arc::new(ThresholdAttestationAuthority::new(config));
        let coprocessor = LocalCoprocessor::new(config, ciphertexts.clone(), attestations.clone());

        let trail = Arc::new(AuditTrail::with_random_id());
        let bus = Arc::new(EventBus::new());
        let sink = FanoutSink::new().with(trail.clone()).with(bus.clone());

        let registry = CaseRegistry::new(
            config.registry.clone(),
            Arc::new(InMemoryCaseStore::new()),
            ciphertexts.clone(),
            attestations.clone(),
            Arc::new(sink),
        );

        debug!(registry = %config.registry, trail_id = %trail.trail_id(), "clinic wired");

        Self {
            registry,
            ciphertexts,
            attestations,
            coprocessor,
            trail,
            bus,
        }
    }

    /// Parse the embedded configuration.
    pub fn default_config() -> RegistryResult<AuthorityConfig> {
        AuthorityConfig::from_toml_str(DEFAULT_AUTHORITY_CONFIG)
    }

    /// The admission context a submission by `author` is bound to.
    pub fn admission_context(&self, author: &Author) -> AdmissionContext {
        AdmissionContext::new(self.registry.principal(), author.clone())
    }

    /// Encrypt an intake's diagnosis and open a case for it.
    pub fn open_case(&self, intake: &MockIntake) -> RegistryResult<CiphertextHandle> {
        let author = intake.author();
        let input = self
            .coprocessor
            .encrypt_u32(intake.diagnosis_code, &self.admission_context(&author));

        self.registry.create(
            NewCase {
                case_id: intake.case_id(),
                patient_id: intake.patient_id(),
                ciphertext: input.ciphertext,
                proof: input.proof,
                numeric_case_identifier: intake.numeric_case_identifier,
                medical_history: intake.medical_history.to_string(),
            },
            &author,
        )
    }

    /// Request a public decryption of a case's diagnosis and submit the
    /// attested result to the registry as `caller`.
    pub fn disclose_and_verify(&self, case_id: &CaseId, caller: &Author) -> RegistryResult<u32> {
        let handle = self.registry.get_ciphertext_handle(case_id)?;
        let decryption = self.coprocessor.public_decrypt(&handle)?;

        self.registry.verify(
            VerifyRequest {
                case_id: case_id.clone(),
                claimed_cleartext: decryption.cleartext,
                proof: decryption.proof,
            },
            caller,
        )
    }
}
