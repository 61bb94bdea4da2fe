//! # Registration Lifecycle Engine
//!
//! Orchestrates the validation of a submitted application: moves it into
//! `PendingValidation`, decides the outcome (explicit decision, no-self-proxy
//! invariant, identity match), and commits exactly one terminal transition
//! through the store's compare-and-swap.
//!
//! ## Concurrency
//!
//! Concurrent validation attempts on the same registration serialize at the
//! store layer only: one caller commits the terminal transition, every other
//! caller observes `AlreadyFinalized`. A matcher outage leaves the record in
//! `PendingValidation` so a later request can safely re-attempt.

use crate::error::{RegistrationError, Result};
use crate::events::EventPublisher;
use crate::identity::{IdentityError, IdentityMatcher};
use crate::models::{ApplicationValidation, ProxyApplication, ValidationDecision};
use crate::resilience::{retry_with_backoff, RetryPolicy};
use crate::state_machine::{
    DistinctPartiesGuard, RegistrationEvent, RegistrationState, RegistrationStateMachine,
    StateGuard, StateMachineError,
};
use crate::store::ApplicationStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Engine owning status transitions of persisted applications
pub struct RegistrationLifecycleEngine {
    store: Arc<dyn ApplicationStore>,
    matcher: Arc<dyn IdentityMatcher>,
    event_publisher: EventPublisher,
    retry: RetryPolicy,
    confidence_threshold: f64,
}

impl RegistrationLifecycleEngine {
    /// Create an engine with injected collaborators
    pub fn new(
        store: Arc<dyn ApplicationStore>,
        matcher: Arc<dyn IdentityMatcher>,
        event_publisher: EventPublisher,
        retry: RetryPolicy,
        confidence_threshold: f64,
    ) -> Self {
        Self {
            store,
            matcher,
            event_publisher,
            retry,
            confidence_threshold,
        }
    }

    /// Create an engine from the loaded configuration
    pub fn from_config(
        config: &crate::config::ProxyVoteConfig,
        store: Arc<dyn ApplicationStore>,
        matcher: Arc<dyn IdentityMatcher>,
        event_publisher: EventPublisher,
    ) -> Self {
        Self::new(
            store,
            matcher,
            event_publisher,
            RetryPolicy::new(
                config.backoff.max_attempts,
                Duration::from_millis(config.backoff.base_delay_ms),
            ),
            config.identity.confidence_threshold,
        )
    }

    /// Fetch the current persisted state of a registration.
    ///
    /// Absence (including a department mismatch) is `Ok(None)`, never an
    /// error; no transition is triggered.
    pub async fn get_registration_by_id(
        &self,
        department: &str,
        registration_id: &str,
    ) -> Result<Option<ProxyApplication>> {
        Ok(self.store.get(department, registration_id).await?)
    }

    /// Validate a registration and return its final state.
    ///
    /// Fails with `NotFound` when the record is absent, `AlreadyFinalized`
    /// once a terminal outcome exists, `InvalidApplication` for a reject
    /// decision without reason, and `IdentitySourceUnavailable` when the
    /// civil registry stays unreachable through the bounded backoff.
    pub async fn validate_registration(
        &self,
        department: &str,
        registration_id: &str,
        validation: ApplicationValidation,
    ) -> Result<RegistrationState> {
        // Input problems must surface before any state is touched.
        let reject_reason = match validation.decision {
            ValidationDecision::Reject => Some(required_reason(&validation)?),
            ValidationDecision::Accept => None,
        };

        let application = self
            .store
            .get(department, registration_id)
            .await?
            .ok_or_else(|| RegistrationError::NotFound {
                department: department.to_string(),
                registration_id: registration_id.to_string(),
            })?;

        if application.status.is_terminal() {
            return Err(RegistrationError::AlreadyFinalized {
                registration_id: application.registration_id,
                status: application.status,
            });
        }

        let mut machine = RegistrationStateMachine::new(
            application.clone(),
            Arc::clone(&self.store),
            self.event_publisher.clone(),
        );

        if application.status == RegistrationState::Submitted {
            self.begin_validation(&mut machine).await?;
        }

        let event = self.decide_outcome(&application, reject_reason).await?;
        let final_state = machine.transition(event).await?;

        info!(
            department = department,
            registration_id = registration_id,
            final_state = %final_state,
            "Registration validation finalized"
        );

        Ok(final_state)
    }

    /// Move the record into `PendingValidation`, tolerating a concurrent
    /// request that got there first.
    async fn begin_validation(&self, machine: &mut RegistrationStateMachine) -> Result<()> {
        match machine.transition(RegistrationEvent::BeginValidation).await {
            Ok(_) => Ok(()),
            Err(StateMachineError::Conflict { actual, .. }) if actual.is_active() => Ok(()),
            Err(StateMachineError::InvalidTransition { .. }) => {
                // Another request may have begun validation between our load
                // and this transition; anything but an active record is real.
                let state = machine
                    .current_state()
                    .await
                    .map_err(RegistrationError::from)?;
                if state.is_active() {
                    Ok(())
                } else if state.is_terminal() {
                    Err(RegistrationError::AlreadyFinalized {
                        registration_id: machine.registration_id().to_string(),
                        status: state,
                    })
                } else {
                    Err(RegistrationError::Internal(format!(
                        "registration {} stuck in state {state}",
                        machine.registration_id()
                    )))
                }
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Decide the terminal event for a pending application.
    ///
    /// The self-proxy invariant dominates everything, including a positive
    /// identity match; the matcher is only consulted when the invariant
    /// holds and the decision is an accept.
    async fn decide_outcome(
        &self,
        application: &ProxyApplication,
        reject_reason: Option<String>,
    ) -> Result<RegistrationEvent> {
        if let Some(reason) = reject_reason {
            return Ok(RegistrationEvent::reject_with_reason(reason));
        }

        if let Err(guard_error) = DistinctPartiesGuard.check(application).await {
            warn!(
                registration_id = %application.registration_id,
                "Rejecting self-proxy application"
            );
            return Ok(RegistrationEvent::reject_with_reason(guard_error.to_string()));
        }

        if application.is_expired(Utc::now()) {
            warn!(
                registration_id = %application.registration_id,
                valid_until = %application.valid_until,
                "Validating an application past its validity window"
            );
        }

        let verdict = retry_with_backoff(
            &self.retry,
            "identity_match",
            || {
                self.matcher
                    .match_identity(&application.applicant, &application.department)
            },
            |error| matches!(error, IdentityError::SourceUnavailable(_)),
        )
        .await?;

        if verdict.matched && verdict.confidence >= self.confidence_threshold {
            Ok(RegistrationEvent::Approve)
        } else if verdict.matched {
            Ok(RegistrationEvent::reject_with_reason(format!(
                "identity match confidence {:.2} below threshold {:.2}",
                verdict.confidence, self.confidence_threshold
            )))
        } else {
            Ok(RegistrationEvent::reject_with_reason(
                "applicant identity not confirmed by the civil registry",
            ))
        }
    }
}

fn required_reason(validation: &ApplicationValidation) -> Result<String> {
    validation
        .reason
        .as_deref()
        .map(str::trim)
        .filter(|reason| !reason.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| {
            RegistrationError::InvalidApplication(
                "a reason is required when rejecting an application".to_string(),
            )
        })
}
