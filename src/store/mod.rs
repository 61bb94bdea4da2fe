//! # Application Record Store
//!
//! Durable storage of proxy-vote applications keyed by
//! `(department, registration_id)`.
//!
//! The compare-and-swap primitive is the single synchronization point of the
//! core: the lifecycle engine implements its at-most-one-transition
//! guarantee on top of it, so no in-process locks are needed around status
//! updates. A conditional write that loses a race reports the actual
//! persisted status so the caller can classify the outcome.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryApplicationStore;
pub use postgres::PostgresApplicationStore;

use crate::models::ProxyApplication;
use crate::state_machine::RegistrationState;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised by store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate record {registration_id} in department {department}")]
    Duplicate {
        department: String,
        registration_id: String,
    },

    #[error("Record {registration_id} not found in department {department}")]
    Missing {
        department: String,
        registration_id: String,
    },

    #[error("Status conflict on {registration_id}: expected {expected}, found {actual}")]
    StatusConflict {
        registration_id: String,
        expected: RegistrationState,
        actual: RegistrationState,
    },

    #[error("Corrupt record {registration_id}: {reason}")]
    Corrupt {
        registration_id: String,
        reason: String,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Fields written together with a terminal status transition.
///
/// `None` leaves the persisted column untouched, so an intermediate
/// transition (into `PendingValidation`) carries the default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerminalFields {
    pub validated_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

impl TerminalFields {
    /// Fields for a validated outcome
    pub fn validated(at: DateTime<Utc>) -> Self {
        Self {
            validated_at: Some(at),
            rejection_reason: None,
        }
    }

    /// Fields for a rejected outcome
    pub fn rejected(at: DateTime<Utc>, reason: impl Into<String>) -> Self {
        Self {
            validated_at: Some(at),
            rejection_reason: Some(reason.into()),
        }
    }
}

/// Durable keyed record store with atomic conditional status updates
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Insert a new record. Fails with [`StoreError::Duplicate`] when the
    /// key already exists.
    async fn put(&self, record: ProxyApplication) -> StoreResult<()>;

    /// Fetch a record by key. Absence is `Ok(None)`, never an error.
    async fn get(
        &self,
        department: &str,
        registration_id: &str,
    ) -> StoreResult<Option<ProxyApplication>>;

    /// Atomically update `status` from `expected` to `new_status`, writing
    /// `fields` in the same operation. Fails with
    /// [`StoreError::StatusConflict`] when the persisted status no longer
    /// matches `expected`, carrying the actual status.
    async fn compare_and_swap_status(
        &self,
        department: &str,
        registration_id: &str,
        expected: RegistrationState,
        new_status: RegistrationState,
        fields: TerminalFields,
    ) -> StoreResult<()>;
}
