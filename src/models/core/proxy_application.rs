//! # Proxy Application Model
//!
//! One proxy-vote registration request, as persisted by the application
//! record store.
//!
//! ## Ownership
//!
//! Records are created once by the intake service and their `status` field
//! transitions at most twice, always through the lifecycle state machine.
//! `registration_id` and `department` are immutable after creation; the pair
//! is the store key. Records are never deleted by this core — retention is
//! external policy.

use super::person::{Applicant, ProxyVoter};
use crate::state_machine::RegistrationState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted proxy-vote application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyApplication {
    /// Opaque unique identifier, assigned at creation
    pub registration_id: String,
    /// Administrative jurisdiction partitioning registrations
    pub department: String,
    pub created_at: DateTime<Utc>,
    /// Strictly after `created_at`; end of the registration's validity window
    pub valid_until: DateTime<Utc>,
    pub applicant: Applicant,
    pub proxy_voter: ProxyVoter,
    pub status: RegistrationState,
    /// Server-assigned timestamp of the terminal transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_at: Option<DateTime<Utc>>,
    /// Present when the terminal state is `Rejected`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl ProxyApplication {
    /// Whether the application has reached a terminal state
    pub fn is_finalized(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether the validity window has elapsed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.valid_until
    }
}

/// Intake payload for a new application, without server-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProxyApplication {
    pub department: String,
    pub applicant: Applicant,
    pub proxy_voter: ProxyVoter,
}
