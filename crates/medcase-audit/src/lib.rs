//! # medcase-audit
//!
//! Event sinks for the MEDCASE registry.
//!
//! ## Overview
//!
//! - [`AuditTrail`] wraps every published event in an [`AuditEntry`] that
//!   links to the previous entry via its SHA-256 hash. Tampering with any
//!   entry breaks the chain and is detected by [`verify_chain`].
//! - [`EventBus`] fans events out to subscribers over unbounded channels.
//! - [`FanoutSink`] combines sinks so the registry sees a single one.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use medcase_audit::{AuditTrail, EventBus, FanoutSink};
//!
//! let trail = Arc::new(AuditTrail::new("clinic-trail"));
//! let bus = Arc::new(EventBus::new());
//! let ui_refresh = bus.subscribe();
//! let sink = Arc::new(FanoutSink::new().with(trail.clone()).with(bus.clone()));
//! // pass `sink` to `CaseRegistry::new(...)`
//! assert!(trail.verify_integrity());
//! ```

pub mod bus;
pub mod chain;
pub mod entry;
pub mod trail;

pub use bus::{EventBus, FanoutSink};
pub use chain::{hash_entry, verify_chain};
pub use entry::{AuditEntry, AuditLog};
pub use trail::AuditTrail;

// ── Tests ─────────────────────────────────────────────────────────────────────
