//! HTTP client for the authoritative civil-registry identity source.

use super::{IdentityError, IdentityMatch, IdentityMatcher};
use crate::config::IdentityConfig;
use crate::models::Applicant;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Matcher consulting a civil registry over HTTP.
///
/// The registry is partitioned by department:
/// `POST {base_url}/departments/{department}/identities/match` with the
/// applicant's identity fields, answering an [`IdentityMatch`] verdict.
#[derive(Debug, Clone)]
pub struct CivilRegistryMatcher {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    birth_date: NaiveDate,
}

impl CivilRegistryMatcher {
    /// Build a matcher from the identity configuration section
    pub fn new(config: &IdentityConfig) -> Result<Self, IdentityError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|error| IdentityError::Protocol(error.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn match_url(&self, department: &str) -> String {
        format!("{}/departments/{department}/identities/match", self.base_url)
    }
}

#[async_trait]
impl IdentityMatcher for CivilRegistryMatcher {
    async fn match_identity(
        &self,
        applicant: &Applicant,
        department: &str,
    ) -> Result<IdentityMatch, IdentityError> {
        let request = MatchRequest {
            first_name: &applicant.first_name,
            last_name: &applicant.last_name,
            birth_date: applicant.birth_date,
        };

        let response = self
            .client
            .post(self.match_url(department))
            .json(&request)
            .send()
            .await
            // Connect errors and timeouts are transport failures, retriable
            .map_err(|error| IdentityError::SourceUnavailable(error.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(IdentityError::SourceUnavailable(format!(
                "civil registry answered {status}"
            )));
        }
        if !status.is_success() {
            return Err(IdentityError::Protocol(format!(
                "unexpected civil registry status {status}"
            )));
        }

        let verdict = response
            .json::<IdentityMatch>()
            .await
            .map_err(|error| IdentityError::Protocol(error.to_string()))?;

        debug!(
            department = department,
            matched = verdict.matched,
            confidence = verdict.confidence,
            "Civil registry verdict received"
        );

        Ok(verdict)
    }
}
