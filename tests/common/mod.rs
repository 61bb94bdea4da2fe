//! Shared fixtures for integration tests.
#![allow(dead_code)]

use proxy_vote_core::config::IntakeConfig;
use proxy_vote_core::events::EventPublisher;
use proxy_vote_core::identity::IdentityMatcher;
use proxy_vote_core::models::{Applicant, NewProxyApplication, ProxyVoter};
use proxy_vote_core::registry::DepartmentRegistry;
use proxy_vote_core::resilience::RetryPolicy;
use proxy_vote_core::services::{RegistrationIntakeService, RegistrationLifecycleEngine};
use proxy_vote_core::store::{ApplicationStore, InMemoryApplicationStore};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

pub const DEPARTMENT: &str = "75001";

pub struct TestHarness {
    pub store: Arc<InMemoryApplicationStore>,
    pub intake: RegistrationIntakeService,
    pub engine: RegistrationLifecycleEngine,
}

/// Build an intake service and lifecycle engine over a shared in-memory
/// store, with a fast retry policy for tests.
pub fn harness_with_matcher(matcher: Arc<dyn IdentityMatcher>) -> TestHarness {
    let store = Arc::new(InMemoryApplicationStore::new());
    let publisher = EventPublisher::default();

    let intake = RegistrationIntakeService::new(
        store.clone() as Arc<dyn ApplicationStore>,
        Arc::new(DepartmentRegistry::with_codes([DEPARTMENT, "13055"])),
        publisher.clone(),
        &IntakeConfig::default(),
    );
    let engine = RegistrationLifecycleEngine::new(
        store.clone() as Arc<dyn ApplicationStore>,
        matcher,
        publisher,
        RetryPolicy::new(3, Duration::from_millis(5)),
        0.75,
    );

    TestHarness {
        store,
        intake,
        engine,
    }
}

/// Applicant born 35 years before the original demo fixture date
pub fn jean_valjean() -> Applicant {
    Applicant {
        first_name: "Jean".to_string(),
        last_name: "Valjean".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1991, 3, 14).unwrap(),
        email_address: Some("demo@demo.com".to_string()),
        street_address: Some("39 Quai du Président Roosevelt".to_string()),
        city_name: Some("Paris".to_string()),
        postal_code: Some("75001".to_string()),
        state: Some("Ile de France".to_string()),
    }
}

pub fn henri_dole() -> ProxyVoter {
    ProxyVoter {
        first_name: "Henri".to_string(),
        last_name: "Dole".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1984, 7, 2).unwrap(),
    }
}

/// Jean Valjean registering Henri Dole as his proxy in department 75001
pub fn sample_application() -> NewProxyApplication {
    NewProxyApplication {
        department: DEPARTMENT.to_string(),
        applicant: jean_valjean(),
        proxy_voter: henri_dole(),
    }
}

/// An application where the applicant designated themselves as proxy
pub fn self_proxy_application() -> NewProxyApplication {
    let applicant = jean_valjean();
    let proxy_voter = ProxyVoter {
        first_name: applicant.first_name.clone(),
        last_name: applicant.last_name.clone(),
        birth_date: applicant.birth_date,
    };
    NewProxyApplication {
        department: DEPARTMENT.to_string(),
        applicant,
        proxy_voter,
    }
}
