//! # medcase-contracts
//!
//! Shared types, domain events, and contracts for the MEDCASE registry.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod authority;
pub mod case;
pub mod error;
pub mod event;
