//! # medcase-core
//!
//! The confidential-case registry for MEDCASE.
//!
//! This crate provides:
//! - The four seam traits (`CaseStore`, `CiphertextAuthority`,
//!   `AttestationAuthority`, `EventSink`)
//! - `InMemoryCaseStore`, the reference `CaseStore`
//! - `KeyedLocks`, the per-case lock table
//! - The `CaseRegistry` that drives the create/verify state machine
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medcase_core::{CaseRegistry, InMemoryCaseStore};
//!
//! let registry = CaseRegistry::new("registry", store, ciphertexts, attestations, sink);
//! let handle = registry.create(new_case, &author)?;
//! ```

pub mod locks;
pub mod memory;
pub mod registry;
pub mod traits;

pub use locks::KeyedLocks;
pub use memory::InMemoryCaseStore;
pub use registry::CaseRegistry;
