//! Structural validation of intake payloads.
//!
//! These checks are shape-only: identity resolution happens later, at
//! validation time, against the authoritative source. Intake only refuses
//! applications that could never be validated.

use crate::error::{RegistrationError, Result};
use crate::models::NewProxyApplication;
use chrono::{DateTime, NaiveDate, Utc};

/// Maximum length for name fields
const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for contact/address fields
const MAX_CONTACT_FIELD_LENGTH: usize = 200;

/// Validate a new application's structure against the clock `now`
pub fn validate_new_application(
    application: &NewProxyApplication,
    now: DateTime<Utc>,
) -> Result<()> {
    if application.department.trim().is_empty() {
        return Err(invalid("department must not be empty"));
    }

    validate_name(&application.applicant.first_name, "applicant.first_name")?;
    validate_name(&application.applicant.last_name, "applicant.last_name")?;
    validate_name(&application.proxy_voter.first_name, "proxy_voter.first_name")?;
    validate_name(&application.proxy_voter.last_name, "proxy_voter.last_name")?;

    validate_birth_date(
        application.applicant.birth_date,
        "applicant.birth_date",
        now,
    )?;
    validate_birth_date(
        application.proxy_voter.birth_date,
        "proxy_voter.birth_date",
        now,
    )?;

    if let Some(email) = &application.applicant.email_address {
        validate_email(email)?;
    }

    let contact_fields = [
        (&application.applicant.street_address, "applicant.street_address"),
        (&application.applicant.city_name, "applicant.city_name"),
        (&application.applicant.postal_code, "applicant.postal_code"),
        (&application.applicant.state, "applicant.state"),
    ];
    for (value, field) in contact_fields {
        if let Some(value) = value {
            if value.len() > MAX_CONTACT_FIELD_LENGTH {
                return Err(invalid(format!(
                    "{field} too long: {} chars (max: {MAX_CONTACT_FIELD_LENGTH})",
                    value.len()
                )));
            }
        }
    }

    Ok(())
}

fn validate_name(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    if value.len() > MAX_NAME_LENGTH {
        return Err(invalid(format!(
            "{field} too long: {} chars (max: {MAX_NAME_LENGTH})",
            value.len()
        )));
    }
    Ok(())
}

fn validate_birth_date(birth_date: NaiveDate, field: &str, now: DateTime<Utc>) -> Result<()> {
    if birth_date > now.date_naive() {
        return Err(invalid(format!("{field} is in the future: {birth_date}")));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(invalid(format!("malformed email address: {email}")));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> RegistrationError {
    RegistrationError::InvalidApplication(message.into())
}
