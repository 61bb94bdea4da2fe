//! Compare-and-swap driven state machine for one registration.
//!
//! Every transition re-resolves the current state from the store and
//! commits through the store's conditional update, so concurrent validation
//! attempts on the same registration serialize at the store layer: exactly
//! one caller commits each transition, the others observe a conflict.

use super::errors::{StateMachineError, StateMachineResult};
use super::events::RegistrationEvent;
use super::guards::{StateGuard, ValidationWindowGuard};
use super::states::RegistrationState;
use crate::constants::events;
use crate::events::EventPublisher;
use crate::models::ProxyApplication;
use crate::store::{ApplicationStore, StoreError, TerminalFields};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Determine the target state for an event, independent of any store.
///
/// Terminal states admit no events at all; that case is reported as
/// `AlreadyFinalized` rather than a plain invalid transition so callers can
/// surface it as a conflict.
pub fn determine_target_state(
    registration_id: &str,
    current_state: RegistrationState,
    event: &RegistrationEvent,
) -> StateMachineResult<RegistrationState> {
    if current_state.is_terminal() {
        return Err(StateMachineError::AlreadyFinalized {
            registration_id: registration_id.to_string(),
            status: current_state,
        });
    }

    let target = match (current_state, event) {
        (RegistrationState::Submitted, RegistrationEvent::BeginValidation) => {
            RegistrationState::PendingValidation
        }
        (RegistrationState::PendingValidation, RegistrationEvent::Approve) => {
            RegistrationState::Validated
        }
        (RegistrationState::PendingValidation, RegistrationEvent::Reject(_)) => {
            RegistrationState::Rejected
        }
        (from_state, event) => {
            return Err(StateMachineError::InvalidTransition {
                from: from_state.to_string(),
                event: event.event_type().to_string(),
            })
        }
    };

    Ok(target)
}

/// State machine for a loaded registration record
pub struct RegistrationStateMachine {
    application: ProxyApplication,
    store: Arc<dyn ApplicationStore>,
    event_publisher: EventPublisher,
}

impl RegistrationStateMachine {
    /// Create a state machine instance for a loaded record
    pub fn new(
        application: ProxyApplication,
        store: Arc<dyn ApplicationStore>,
        event_publisher: EventPublisher,
    ) -> Self {
        Self {
            application,
            store,
            event_publisher,
        }
    }

    /// Get the underlying application record
    pub fn application(&self) -> &ProxyApplication {
        &self.application
    }

    /// Get the registration id
    pub fn registration_id(&self) -> &str {
        &self.application.registration_id
    }

    /// Resolve the current state from the store
    pub async fn current_state(&self) -> StateMachineResult<RegistrationState> {
        match self
            .store
            .get(&self.application.department, &self.application.registration_id)
            .await?
        {
            Some(record) => Ok(record.status),
            None => Err(StateMachineError::Internal(format!(
                "Registration {} disappeared from the store",
                self.application.registration_id
            ))),
        }
    }

    /// Attempt to transition the registration state.
    ///
    /// The commit is a conditional store update against the state resolved
    /// at the start of this call; losing the race yields `AlreadyFinalized`
    /// when the winner reached a terminal state, `Conflict` otherwise.
    pub async fn transition(
        &mut self,
        event: RegistrationEvent,
    ) -> StateMachineResult<RegistrationState> {
        let current_state = self.current_state().await?;
        let target_state =
            determine_target_state(&self.application.registration_id, current_state, &event)?;

        self.check_guards(current_state, target_state).await?;

        let fields = match &event {
            RegistrationEvent::Approve => TerminalFields::validated(Utc::now()),
            RegistrationEvent::Reject(reason) => TerminalFields::rejected(Utc::now(), reason.clone()),
            RegistrationEvent::BeginValidation => TerminalFields::default(),
        };

        let commit = self
            .store
            .compare_and_swap_status(
                &self.application.department,
                &self.application.registration_id,
                current_state,
                target_state,
                fields.clone(),
            )
            .await;

        match commit {
            Ok(()) => {}
            Err(StoreError::StatusConflict { actual, .. }) if actual.is_terminal() => {
                return Err(StateMachineError::AlreadyFinalized {
                    registration_id: self.application.registration_id.clone(),
                    status: actual,
                })
            }
            Err(StoreError::StatusConflict { actual, .. }) => {
                return Err(StateMachineError::Conflict {
                    expected: current_state,
                    actual,
                })
            }
            Err(other) => return Err(other.into()),
        }

        self.application.status = target_state;
        if let Some(validated_at) = fields.validated_at {
            self.application.validated_at = Some(validated_at);
        }
        if let Some(reason) = fields.rejection_reason {
            self.application.rejection_reason = Some(reason);
        }

        info!(
            department = %self.application.department,
            registration_id = %self.application.registration_id,
            from = %current_state,
            to = %target_state,
            event = event.event_type(),
            "Registration state transition committed"
        );

        if let Some(event_name) = Self::event_name_for(target_state) {
            if let Err(error) = self.event_publisher.publish_transition(
                event_name,
                &self.application.department,
                &self.application.registration_id,
                &current_state.to_string(),
                &target_state.to_string(),
            ) {
                warn!(
                    registration_id = %self.application.registration_id,
                    error = %error,
                    "Failed to publish transition event"
                );
            }
        }

        Ok(target_state)
    }

    /// Check guard conditions for the transition
    async fn check_guards(
        &self,
        current_state: RegistrationState,
        target_state: RegistrationState,
    ) -> StateMachineResult<()> {
        match (current_state, target_state) {
            // A validation may only begin on a structurally sound record
            (RegistrationState::Submitted, RegistrationState::PendingValidation) => {
                ValidationWindowGuard.check(&self.application).await?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Check if the registration is in a terminal state
    pub async fn is_terminal(&self) -> StateMachineResult<bool> {
        Ok(self.current_state().await?.is_terminal())
    }

    fn event_name_for(target_state: RegistrationState) -> Option<&'static str> {
        match target_state {
            RegistrationState::PendingValidation => Some(events::REGISTRATION_VALIDATION_STARTED),
            RegistrationState::Validated => Some(events::REGISTRATION_VALIDATED),
            RegistrationState::Rejected => Some(events::REGISTRATION_REJECTED),
            RegistrationState::Submitted => None,
        }
    }
}
