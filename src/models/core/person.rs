//! # Applicant and Proxy Voter Identity
//!
//! Identity of the two parties of a proxy-vote application: the applicant
//! (the person registering to vote by proxy) and the proxy voter (the person
//! designated to cast the vote on their behalf).
//!
//! The applicant carries a full contact block because the civil registry is
//! consulted with it; the proxy voter only needs enough identity to enforce
//! the no-self-proxy invariant.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The person registering to vote by proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// The person designated to cast the vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyVoter {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}

impl Applicant {
    /// Whether the applicant and the proxy voter designate the same
    /// individual. Names are compared trimmed and case-insensitively; birth
    /// dates must match exactly.
    pub fn is_same_person(&self, proxy_voter: &ProxyVoter) -> bool {
        normalize(&self.first_name) == normalize(&proxy_voter.first_name)
            && normalize(&self.last_name) == normalize(&proxy_voter.last_name)
            && self.birth_date == proxy_voter.birth_date
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
