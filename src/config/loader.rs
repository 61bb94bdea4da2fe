//! Configuration loading: defaults, optional file, environment overrides.

use super::ProxyVoteConfig;
use crate::error::{RegistrationError, Result};
use config::{Config, Environment, File};
use tracing::info;

/// Environment variable naming the optional configuration file
pub const CONFIG_FILE_ENV: &str = "PROXY_VOTE_CONFIG";

/// Prefix for environment overrides, e.g.
/// `PROXY_VOTE__INTAKE__VALIDITY_WINDOW_DAYS=30`
pub const ENV_PREFIX: &str = "PROXY_VOTE";

/// Loaded, validated configuration
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: ProxyVoteConfig,
}

impl ConfigManager {
    /// Load configuration from defaults, then the file named by
    /// `PROXY_VOTE_CONFIG` (if set), then `PROXY_VOTE__*` environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&ProxyVoteConfig::default())
                .map_err(|error| RegistrationError::Configuration(error.to_string()))?,
        );

        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            builder = builder.add_source(File::with_name(&path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        let config: ProxyVoteConfig = builder
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|error| RegistrationError::Configuration(error.to_string()))?;

        Self::validate(&config)?;

        info!(
            validity_window_days = config.intake.validity_window_days,
            departments = config.departments.len(),
            identity_base_url = %config.identity.base_url,
            "Configuration loaded"
        );

        Ok(Self { config })
    }

    /// Build a manager around an already-assembled configuration
    pub fn from_config(config: ProxyVoteConfig) -> Result<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Access the loaded configuration
    pub fn config(&self) -> &ProxyVoteConfig {
        &self.config
    }

    fn validate(config: &ProxyVoteConfig) -> Result<()> {
        if config.intake.validity_window_days <= 0 {
            return Err(RegistrationError::Configuration(
                "intake.validity_window_days must be positive".to_string(),
            ));
        }
        if config.backoff.max_attempts == 0 {
            return Err(RegistrationError::Configuration(
                "backoff.max_attempts must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&config.identity.confidence_threshold) {
            return Err(RegistrationError::Configuration(
                "identity.confidence_threshold must be within [0.0, 1.0]".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntakeConfig;

    #[test]
    fn test_from_config_validates() {
        let mut config = ProxyVoteConfig::default();
        config.intake = IntakeConfig {
            validity_window_days: 0,
        };
        let err = ConfigManager::from_config(config).unwrap_err();
        assert!(matches!(err, RegistrationError::Configuration(_)));
    }

    #[test]
    fn test_from_config_accepts_defaults() {
        let manager = ConfigManager::from_config(ProxyVoteConfig::default()).unwrap();
        assert_eq!(manager.config().backoff.max_attempts, 3);
    }
}
