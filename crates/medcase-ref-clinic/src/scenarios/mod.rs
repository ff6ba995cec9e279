//! Clinical reference scenarios.
//!
//! Each scenario wires a fresh `Clinic` from the given authority
//! configuration and demonstrates one property of the registry.

pub mod concurrent_intake;
pub mod end_to_end;
pub mod tampered_attestation;
