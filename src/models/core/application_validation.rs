//! Validation decision submitted for a pending application.

use serde::{Deserialize, Serialize};

/// The decision carried by a validation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationDecision {
    Accept,
    Reject,
}

/// A validation decision for one application.
///
/// `reason` is required when the decision is `Reject`. The timestamp of the
/// decision is server-assigned by the lifecycle engine, never taken from
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationValidation {
    pub decision: ValidationDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApplicationValidation {
    /// An accepting decision
    pub fn accept() -> Self {
        Self {
            decision: ValidationDecision::Accept,
            reason: None,
        }
    }

    /// A rejecting decision with the mandatory reason
    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            decision: ValidationDecision::Reject,
            reason: Some(reason.into()),
        }
    }
}
