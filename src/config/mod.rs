//! # Configuration
//!
//! Typed configuration for the registration core, layered from explicit
//! defaults, an optional file, and environment overrides. No silent
//! fallbacks: every value has one declared default here, and anything a
//! deployment sets replaces it wholesale.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use proxy_vote_core::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let window = manager.config().intake.validity_window_days;
//! # let _ = window;
//! # Ok(())
//! # }
//! ```

pub mod loader;

pub use loader::ConfigManager;

use crate::constants::system;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyVoteConfig {
    /// Intake service settings
    pub intake: IntakeConfig,

    /// Identity source (civil registry) settings
    pub identity: IdentityConfig,

    /// Matcher retry/backoff settings
    pub backoff: BackoffConfig,

    /// Database connection settings for the Postgres store
    pub database: DatabaseConfig,

    /// Known jurisdiction codes accepted at intake
    pub departments: Vec<String>,
}

impl Default for ProxyVoteConfig {
    fn default() -> Self {
        Self {
            intake: IntakeConfig::default(),
            identity: IdentityConfig::default(),
            backoff: BackoffConfig::default(),
            database: DatabaseConfig::default(),
            departments: Vec::new(),
        }
    }
}

/// Intake service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Days between `created_at` and `valid_until` on new applications
    pub validity_window_days: i64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            validity_window_days: system::DEFAULT_VALIDITY_WINDOW_DAYS,
        }
    }
}

/// Identity source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Base URL of the civil registry
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Minimum confidence for a positive match to count
    pub confidence_threshold: f64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8089".to_string(),
            request_timeout_ms: system::DEFAULT_MATCH_TIMEOUT_MS,
            confidence_threshold: system::DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

/// Matcher retry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Total attempts against the identity source, including the first
    pub max_attempts: u32,

    /// Base delay in milliseconds; doubles per attempt
    pub base_delay_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_attempts: system::DEFAULT_MATCH_ATTEMPTS,
            base_delay_ms: system::DEFAULT_MATCH_BACKOFF_MS,
        }
    }
}

/// Database settings for the Postgres store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL; absent means the deployment uses the in-memory store
    pub url: Option<String>,

    /// Connection pool size
    pub pool: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { url: None, pool: 5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProxyVoteConfig::default();
        assert_eq!(config.intake.validity_window_days, 200);
        assert_eq!(config.backoff.max_attempts, 3);
        assert_eq!(config.backoff.base_delay_ms, 100);
        assert!(config.departments.is_empty());
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: ProxyVoteConfig = serde_json::from_str(
            r#"{ "intake": { "validity_window_days": 30 }, "departments": ["75001"] }"#,
        )
        .unwrap();
        assert_eq!(config.intake.validity_window_days, 30);
        assert_eq!(config.departments, vec!["75001".to_string()]);
        // Untouched sections keep their defaults
        assert_eq!(config.identity.request_timeout_ms, 5_000);
    }
}
