//! Error types for state machine transitions, guards, and persistence.

use super::states::RegistrationState;
use crate::error::RegistrationError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors raised by transition guards
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("Business rule violation: {reason}")]
    BusinessRuleViolation { reason: String },

    #[error("Invalid state: {state}")]
    InvalidState { state: String },
}

pub type GuardResult<T> = std::result::Result<T, GuardError>;

/// Create a business-rule-violation guard error
pub fn business_rule_violation(reason: impl Into<String>) -> GuardError {
    GuardError::BusinessRuleViolation {
        reason: reason.into(),
    }
}

/// Errors raised while driving a registration through its state machine
#[derive(Debug, Error)]
pub enum StateMachineError {
    #[error("Invalid transition from {from} on {event}")]
    InvalidTransition { from: String, event: String },

    #[error("Registration {registration_id} is already finalized as {status}")]
    AlreadyFinalized {
        registration_id: String,
        status: RegistrationState,
    },

    #[error("Concurrent update conflict: expected {expected}, found {actual}")]
    Conflict {
        expected: RegistrationState,
        actual: RegistrationState,
    },

    #[error("Guard failed: {reason}")]
    GuardFailed { reason: String },

    #[error("Persistence failed: {0}")]
    Persistence(#[from] StoreError),

    #[error("Internal state machine error: {0}")]
    Internal(String),
}

pub type StateMachineResult<T> = std::result::Result<T, StateMachineError>;

impl From<GuardError> for StateMachineError {
    fn from(error: GuardError) -> Self {
        Self::GuardFailed {
            reason: error.to_string(),
        }
    }
}

impl From<StateMachineError> for RegistrationError {
    fn from(error: StateMachineError) -> Self {
        match error {
            StateMachineError::InvalidTransition { from, event } => {
                Self::InvalidStateTransition { from, event }
            }
            StateMachineError::AlreadyFinalized {
                registration_id,
                status,
            } => Self::AlreadyFinalized {
                registration_id,
                status,
            },
            StateMachineError::Conflict { expected, actual } => Self::Conflict(format!(
                "expected status {expected}, found {actual}"
            )),
            StateMachineError::GuardFailed { reason } => Self::InvalidApplication(reason),
            StateMachineError::Persistence(store_error) => Self::Store(store_error),
            StateMachineError::Internal(message) => Self::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_chain() {
        let guard_err = business_rule_violation("applicant and proxy voter must be distinct");
        let sm_err: StateMachineError = guard_err.into();

        match sm_err {
            StateMachineError::GuardFailed { reason } => {
                assert!(reason.contains("Business rule violation"));
            }
            _ => panic!("Expected GuardFailed error"),
        }
    }

    #[test]
    fn test_error_messages() {
        let err = StateMachineError::AlreadyFinalized {
            registration_id: "abc-123".to_string(),
            status: RegistrationState::Validated,
        };
        assert_eq!(
            err.to_string(),
            "Registration abc-123 is already finalized as validated"
        );

        let err = StateMachineError::Conflict {
            expected: RegistrationState::PendingValidation,
            actual: RegistrationState::Rejected,
        };
        assert!(err.to_string().contains("pending_validation"));
        assert!(err.to_string().contains("rejected"));
    }

    #[test]
    fn test_conversion_to_registration_error() {
        let err: RegistrationError = StateMachineError::AlreadyFinalized {
            registration_id: "abc".to_string(),
            status: RegistrationState::Rejected,
        }
        .into();
        assert!(matches!(
            err,
            RegistrationError::AlreadyFinalized { status: RegistrationState::Rejected, .. }
        ));
    }
}
