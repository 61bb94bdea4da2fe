use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a proxy-vote application.
///
/// A record is created in `Submitted`, moves to `PendingValidation` when a
/// validation request arrives, and finishes in exactly one of the two
/// terminal states. Terminal states admit no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationState {
    /// Initial state assigned at intake
    Submitted,
    /// A validation request has been accepted for processing
    PendingValidation,
    /// Identity confirmed, registration is legally effective
    Validated,
    /// Definitively refused
    Rejected,
}

impl RegistrationState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Validated | Self::Rejected)
    }

    /// Check if this is an active state (a validation is in flight)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::PendingValidation)
    }
}

impl fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted => write!(f, "submitted"),
            Self::PendingValidation => write!(f, "pending_validation"),
            Self::Validated => write!(f, "validated"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for RegistrationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(Self::Submitted),
            "pending_validation" => Ok(Self::PendingValidation),
            "validated" => Ok(Self::Validated),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Invalid registration state: {s}")),
        }
    }
}

/// Default state for newly created applications
impl Default for RegistrationState {
    fn default() -> Self {
        Self::Submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_check() {
        assert!(RegistrationState::Validated.is_terminal());
        assert!(RegistrationState::Rejected.is_terminal());
        assert!(!RegistrationState::Submitted.is_terminal());
        assert!(!RegistrationState::PendingValidation.is_terminal());
    }

    #[test]
    fn test_active_check() {
        assert!(RegistrationState::PendingValidation.is_active());
        assert!(!RegistrationState::Submitted.is_active());
        assert!(!RegistrationState::Validated.is_active());
    }

    #[test]
    fn test_state_string_conversion() {
        assert_eq!(
            RegistrationState::PendingValidation.to_string(),
            "pending_validation"
        );
        assert_eq!(
            "validated".parse::<RegistrationState>().unwrap(),
            RegistrationState::Validated
        );
        assert!("unknown".parse::<RegistrationState>().is_err());
    }

    #[test]
    fn test_state_serde() {
        let state = RegistrationState::PendingValidation;
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, "\"pending_validation\"");

        let parsed: RegistrationState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_default_state() {
        assert_eq!(RegistrationState::default(), RegistrationState::Submitted);
    }
}
