//! # Registration Intake Service
//!
//! Accepts new proxy-vote applications: structural validation, department
//! check, identifier assignment, validity window, initial persisted state.
//!
//! Intake deliberately performs no identity resolution — that happens at
//! validation time. Each call creates a new record; duplicate detection is
//! not provided at this layer.

use crate::config::IntakeConfig;
use crate::constants::events;
use crate::error::{RegistrationError, Result};
use crate::events::EventPublisher;
use crate::models::{NewProxyApplication, ProxyApplication};
use crate::registry::DepartmentRegistry;
use crate::state_machine::RegistrationState;
use crate::store::ApplicationStore;
use crate::validation::validate_new_application;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Service creating registration records
pub struct RegistrationIntakeService {
    store: Arc<dyn ApplicationStore>,
    departments: Arc<DepartmentRegistry>,
    event_publisher: EventPublisher,
    validity_window: Duration,
}

impl RegistrationIntakeService {
    /// Create an intake service with injected collaborators
    pub fn new(
        store: Arc<dyn ApplicationStore>,
        departments: Arc<DepartmentRegistry>,
        event_publisher: EventPublisher,
        intake: &IntakeConfig,
    ) -> Self {
        Self {
            store,
            departments,
            event_publisher,
            validity_window: Duration::days(intake.validity_window_days),
        }
    }

    /// Accept a new application and return its assigned registration id.
    ///
    /// Exactly one durable record is created on success, in state
    /// `Submitted`, with `valid_until = created_at + validity window`.
    pub async fn create_registration(&self, application: NewProxyApplication) -> Result<String> {
        let now = Utc::now();
        validate_new_application(&application, now)?;

        if !self.departments.is_known(&application.department) {
            return Err(RegistrationError::UnknownDepartment(application.department));
        }

        let registration_id = Uuid::new_v4().to_string();
        let record = ProxyApplication {
            registration_id: registration_id.clone(),
            department: application.department.clone(),
            created_at: now,
            valid_until: now + self.validity_window,
            applicant: application.applicant,
            proxy_voter: application.proxy_voter,
            status: RegistrationState::default(),
            validated_at: None,
            rejection_reason: None,
        };

        self.store.put(record).await?;

        info!(
            department = %application.department,
            registration_id = %registration_id,
            valid_until = %(now + self.validity_window),
            "📥 Registration submitted"
        );

        if let Err(error) = self.event_publisher.publish_registration(
            events::REGISTRATION_SUBMITTED,
            &application.department,
            &registration_id,
            json!({ "status": RegistrationState::default() }),
        ) {
            warn!(
                registration_id = %registration_id,
                error = %error,
                "Failed to publish submission event"
            );
        }

        Ok(registration_id)
    }
}
