use serde::{Deserialize, Serialize};

/// Events that can trigger registration state transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum RegistrationEvent {
    /// A validation request has arrived for this registration
    BeginValidation,
    /// Identity confirmed and invariants hold, finalize as validated
    Approve,
    /// Finalize as rejected with a human-readable reason
    Reject(String),
}

impl RegistrationEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::BeginValidation => "begin_validation",
            Self::Approve => "approve",
            Self::Reject(_) => "reject",
        }
    }

    /// Extract the rejection reason if this is a reject event
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Reject(reason) => Some(reason),
            _ => None,
        }
    }

    /// Check if this event represents a terminal transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approve | Self::Reject(_))
    }

    /// Create a rejection event with the given reason
    pub fn reject_with_reason(reason: impl Into<String>) -> Self {
        Self::Reject(reason.into())
    }
}
