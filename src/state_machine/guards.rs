use super::errors::{business_rule_violation, GuardResult};
use crate::models::ProxyApplication;
use async_trait::async_trait;

/// Trait for implementing state transition guards
#[async_trait]
pub trait StateGuard: Send + Sync {
    /// Check if a transition is allowed for this application
    async fn check(&self, application: &ProxyApplication) -> GuardResult<()>;

    /// Get a description of this guard for logging
    fn description(&self) -> &'static str;
}

/// Guard enforcing the no-self-proxy invariant: the applicant and the proxy
/// voter must be distinct individuals.
pub struct DistinctPartiesGuard;

#[async_trait]
impl StateGuard for DistinctPartiesGuard {
    async fn check(&self, application: &ProxyApplication) -> GuardResult<()> {
        if application.applicant.is_same_person(&application.proxy_voter) {
            return Err(business_rule_violation(format!(
                "Registration {} designates the applicant as their own proxy voter",
                application.registration_id
            )));
        }
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Applicant and proxy voter must be distinct individuals"
    }
}

/// Guard checking the record-shape invariant `valid_until > created_at`
/// before a validation begins.
pub struct ValidationWindowGuard;

#[async_trait]
impl StateGuard for ValidationWindowGuard {
    async fn check(&self, application: &ProxyApplication) -> GuardResult<()> {
        if application.valid_until <= application.created_at {
            return Err(business_rule_violation(format!(
                "Registration {} has a validity window ending at or before its creation",
                application.registration_id
            )));
        }
        Ok(())
    }

    fn description(&self) -> &'static str {
        "Validity window must end after creation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Applicant, ProxyVoter};
    use crate::state_machine::RegistrationState;
    use chrono::{Duration, NaiveDate, Utc};

    fn application(proxy_voter: ProxyVoter) -> ProxyApplication {
        let created_at = Utc::now();
        ProxyApplication {
            registration_id: "reg-1".to_string(),
            department: "75001".to_string(),
            created_at,
            valid_until: created_at + Duration::days(200),
            applicant: Applicant {
                first_name: "Jean".to_string(),
                last_name: "Valjean".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1991, 3, 14).unwrap(),
                email_address: None,
                street_address: None,
                city_name: None,
                postal_code: None,
                state: None,
            },
            proxy_voter,
            status: RegistrationState::Submitted,
            validated_at: None,
            rejection_reason: None,
        }
    }

    #[tokio::test]
    async fn test_distinct_parties_guard_passes() {
        let app = application(ProxyVoter {
            first_name: "Henri".to_string(),
            last_name: "Dole".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1984, 7, 2).unwrap(),
        });
        assert!(DistinctPartiesGuard.check(&app).await.is_ok());
    }

    #[tokio::test]
    async fn test_distinct_parties_guard_rejects_self_proxy() {
        let app = application(ProxyVoter {
            first_name: "jean".to_string(),
            last_name: "VALJEAN".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1991, 3, 14).unwrap(),
        });
        let err = DistinctPartiesGuard.check(&app).await.unwrap_err();
        assert!(err.to_string().contains("own proxy voter"));
    }

    #[tokio::test]
    async fn test_validation_window_guard() {
        let mut app = application(ProxyVoter {
            first_name: "Henri".to_string(),
            last_name: "Dole".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1984, 7, 2).unwrap(),
        });
        assert!(ValidationWindowGuard.check(&app).await.is_ok());

        app.valid_until = app.created_at;
        assert!(ValidationWindowGuard.check(&app).await.is_err());
    }

    #[test]
    fn test_guard_descriptions() {
        assert_eq!(
            DistinctPartiesGuard.description(),
            "Applicant and proxy voter must be distinct individuals"
        );
        assert_eq!(
            ValidationWindowGuard.description(),
            "Validity window must end after creation"
        );
    }
}
