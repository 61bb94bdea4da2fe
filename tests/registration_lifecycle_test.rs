//! Registration Lifecycle Tests
//!
//! End-to-end intake-then-validate scenarios over the in-memory store.

mod common;

use common::{
    harness_with_matcher, sample_application, self_proxy_application, DEPARTMENT,
};
use proxy_vote_core::error::RegistrationError;
use proxy_vote_core::identity::StaticMatcher;
use proxy_vote_core::models::ApplicationValidation;
use proxy_vote_core::state_machine::RegistrationState;
use std::sync::Arc;

#[tokio::test]
async fn test_accepting_validation_with_match_validates() -> anyhow::Result<()> {
    let harness = harness_with_matcher(Arc::new(StaticMatcher::matching()));

    // Jean Valjean registers Henri Dole as his proxy in department 75001
    let registration_id = harness
        .intake
        .create_registration(sample_application())
        .await?;

    let state = harness
        .engine
        .validate_registration(DEPARTMENT, &registration_id, ApplicationValidation::accept())
        .await?;
    assert_eq!(state, RegistrationState::Validated);

    let record = harness
        .engine
        .get_registration_by_id(DEPARTMENT, &registration_id)
        .await?
        .expect("record must exist");
    assert_eq!(record.status, RegistrationState::Validated);
    assert!(record.validated_at.is_some());
    assert!(record.rejection_reason.is_none());

    Ok(())
}

#[tokio::test]
async fn test_negative_match_rejects() -> anyhow::Result<()> {
    let harness = harness_with_matcher(Arc::new(StaticMatcher::non_matching()));

    let registration_id = harness
        .intake
        .create_registration(sample_application())
        .await?;

    let state = harness
        .engine
        .validate_registration(DEPARTMENT, &registration_id, ApplicationValidation::accept())
        .await?;
    assert_eq!(state, RegistrationState::Rejected);

    let record = harness
        .engine
        .get_registration_by_id(DEPARTMENT, &registration_id)
        .await?
        .expect("record must exist");
    assert!(record
        .rejection_reason
        .as_deref()
        .unwrap()
        .contains("not confirmed"));

    Ok(())
}

#[tokio::test]
async fn test_self_proxy_rejected_regardless_of_matcher() -> anyhow::Result<()> {
    // The matcher confirms everything; the invariant must still dominate.
    let harness = harness_with_matcher(Arc::new(StaticMatcher::matching()));

    let registration_id = harness
        .intake
        .create_registration(self_proxy_application())
        .await?;

    let state = harness
        .engine
        .validate_registration(DEPARTMENT, &registration_id, ApplicationValidation::accept())
        .await?;
    assert_eq!(state, RegistrationState::Rejected);

    Ok(())
}

#[tokio::test]
async fn test_explicit_reject_persists_reason() -> anyhow::Result<()> {
    let harness = harness_with_matcher(Arc::new(StaticMatcher::matching()));

    let registration_id = harness
        .intake
        .create_registration(sample_application())
        .await?;

    let state = harness
        .engine
        .validate_registration(
            DEPARTMENT,
            &registration_id,
            ApplicationValidation::reject("supporting documents missing"),
        )
        .await?;
    assert_eq!(state, RegistrationState::Rejected);

    let record = harness
        .engine
        .get_registration_by_id(DEPARTMENT, &registration_id)
        .await?
        .expect("record must exist");
    assert_eq!(
        record.rejection_reason.as_deref(),
        Some("supporting documents missing")
    );
    assert!(record.validated_at.is_some());

    Ok(())
}

#[tokio::test]
async fn test_second_validation_fails_already_finalized() -> anyhow::Result<()> {
    let harness = harness_with_matcher(Arc::new(StaticMatcher::matching()));

    let registration_id = harness
        .intake
        .create_registration(sample_application())
        .await?;

    harness
        .engine
        .validate_registration(DEPARTMENT, &registration_id, ApplicationValidation::accept())
        .await?;

    let err = harness
        .engine
        .validate_registration(DEPARTMENT, &registration_id, ApplicationValidation::accept())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::AlreadyFinalized {
            status: RegistrationState::Validated,
            ..
        }
    ));

    // The persisted state is untouched by the failed second attempt
    let record = harness
        .engine
        .get_registration_by_id(DEPARTMENT, &registration_id)
        .await?
        .expect("record must exist");
    assert_eq!(record.status, RegistrationState::Validated);

    Ok(())
}

#[tokio::test]
async fn test_get_nonexistent_is_absent_not_error() -> anyhow::Result<()> {
    let harness = harness_with_matcher(Arc::new(StaticMatcher::matching()));

    let record = harness
        .engine
        .get_registration_by_id(DEPARTMENT, "does-not-exist")
        .await?;
    assert!(record.is_none());

    Ok(())
}

#[tokio::test]
async fn test_department_mismatch_is_not_found() -> anyhow::Result<()> {
    let harness = harness_with_matcher(Arc::new(StaticMatcher::matching()));

    let registration_id = harness
        .intake
        .create_registration(sample_application())
        .await?;

    // Readable under the right department, absent under another
    assert!(harness
        .engine
        .get_registration_by_id("13055", &registration_id)
        .await?
        .is_none());

    let err = harness
        .engine
        .validate_registration("13055", &registration_id, ApplicationValidation::accept())
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::NotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn test_validate_nonexistent_is_not_found() {
    let harness = harness_with_matcher(Arc::new(StaticMatcher::matching()));

    let err = harness
        .engine
        .validate_registration(DEPARTMENT, "ghost", ApplicationValidation::accept())
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::NotFound { .. }));
}
