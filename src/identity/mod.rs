//! # Identity Matcher
//!
//! Comparison of submitted applicant identity against an authoritative
//! source, keyed by department. A negative match is a definitive business
//! outcome; only source unavailability is an error, and it is the one
//! retriable condition in the core.

pub mod civil_registry;

pub use civil_registry::CivilRegistryMatcher;

use crate::models::Applicant;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verdict returned by an identity source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdentityMatch {
    pub matched: bool,
    pub confidence: f64,
}

/// Errors raised by identity matchers
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The authoritative source cannot be reached; retriable
    #[error("Identity source unavailable: {0}")]
    SourceUnavailable(String),

    /// The source answered in a way this core does not understand
    #[error("Identity source protocol error: {0}")]
    Protocol(String),
}

/// Authority consulted during validation
#[async_trait]
pub trait IdentityMatcher: Send + Sync {
    /// Compare the applicant identity against the authoritative source for
    /// the given department.
    async fn match_identity(
        &self,
        applicant: &Applicant,
        department: &str,
    ) -> Result<IdentityMatch, IdentityError>;
}

/// Fixed-verdict matcher for tests and local wiring.
#[derive(Debug, Clone)]
pub struct StaticMatcher {
    verdict: IdentityMatch,
}

impl StaticMatcher {
    pub fn new(matched: bool, confidence: f64) -> Self {
        Self {
            verdict: IdentityMatch { matched, confidence },
        }
    }

    /// A matcher that confirms every identity
    pub fn matching() -> Self {
        Self::new(true, 1.0)
    }

    /// A matcher that refuses every identity
    pub fn non_matching() -> Self {
        Self::new(false, 0.0)
    }
}

#[async_trait]
impl IdentityMatcher for StaticMatcher {
    async fn match_identity(
        &self,
        _applicant: &Applicant,
        _department: &str,
    ) -> Result<IdentityMatch, IdentityError> {
        Ok(self.verdict)
    }
}
