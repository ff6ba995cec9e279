//! # medcase-ref-clinic
//!
//! Clinical reference runtime for the MEDCASE registry.
//!
//! Wires the registry to the reference authorities, an audit trail, and an
//! event bus, and runs three scenarios over fictional intake data:
//!
//! 1. **End to end**: intake, public disclosure, attested verification
//! 2. **Concurrent intake**: racing creators and racing reviewers
//! 3. **Tampered attestation**: lifted, rewritten, and stripped proofs
//!
//! The sensitive value (a diagnosis code) is never handed to the registry
//! in the clear; it only becomes readable after a threshold of signers
//! attests to its decryption.

pub mod clinic;
pub mod mock_data;
pub mod scenarios;

pub use clinic::Clinic;

// ── Tests ─────────────────────────────────────────────────────────────────────
