//! Crate-wide error taxonomy.
//!
//! Client input problems (`InvalidApplication`, `UnknownDepartment`) are
//! never retried. State-machine violations (`InvalidStateTransition`,
//! `AlreadyFinalized`) and store races (`Conflict`) surface as conflicts to
//! the embedding layer. `IdentitySourceUnavailable` is the only transient
//! variant; the caller may retry the whole validation request.

use crate::identity::IdentityError;
use crate::state_machine::RegistrationState;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Invalid application: {0}")]
    InvalidApplication(String),

    #[error("Unknown department code: {0}")]
    UnknownDepartment(String),

    #[error("Registration {registration_id} not found in department {department}")]
    NotFound {
        department: String,
        registration_id: String,
    },

    #[error("No transition from {from} on {event}")]
    InvalidStateTransition { from: String, event: String },

    #[error("Registration {registration_id} is already finalized as {status}")]
    AlreadyFinalized {
        registration_id: String,
        status: RegistrationState,
    },

    #[error("Identity source unavailable: {0}")]
    IdentitySourceUnavailable(String),

    #[error("Conflicting concurrent update: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<IdentityError> for RegistrationError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::SourceUnavailable(message) => Self::IdentitySourceUnavailable(message),
            IdentityError::Protocol(message) => {
                Self::Internal(format!("identity source protocol error: {message}"))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
