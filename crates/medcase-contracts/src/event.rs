//! Domain events published by the registry.
//!
//! Events are emitted only after a transition has been committed to the
//! store. Subscribers observe them; they cannot veto or delay them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::case::{Author, CaseId};

/// Unique identifier of one published event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub uuid::Uuid);

impl EventId {
    /// Create a new, unique event ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

/// A committed state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A case was admitted and stored.
    CaseCreated { case_id: CaseId, author: Author },
    /// A case's diagnosis was attested and recorded.
    DiagnosisVerified { case_id: CaseId, value: u32 },
}

impl DomainEvent {
    /// The case this event concerns.
    pub fn case_id(&self) -> &CaseId {
        match self {
            Self::CaseCreated { case_id, .. } | Self::DiagnosisVerified { case_id, .. } => case_id,
        }
    }

    /// Short discriminant for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CaseCreated { .. } => "case_created",
            Self::DiagnosisVerified { .. } => "diagnosis_verified",
        }
    }
}

/// A domain event stamped with its identity and publication time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedEvent {
    pub event_id: EventId,
    pub occurred_at: DateTime<Utc>,
    pub event: DomainEvent,
}

impl PublishedEvent {
    /// Stamp `event` with a fresh id and the current time.
    pub fn now(event: DomainEvent) -> Self {
        Self {
            event_id: EventId::new(),
            occurred_at: Utc::now(),
            event,
        }
    }
}
