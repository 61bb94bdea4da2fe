//! # System Constants
//!
//! Event names and operational defaults for the registration core.

// Re-export the state type under its status alias for convenience
pub use crate::state_machine::RegistrationState as RegistrationStatus;

/// Lifecycle events published on registration transitions
pub mod events {
    pub const REGISTRATION_SUBMITTED: &str = "registration.submitted";
    pub const REGISTRATION_VALIDATION_STARTED: &str = "registration.validation_started";
    pub const REGISTRATION_VALIDATED: &str = "registration.validated";
    pub const REGISTRATION_REJECTED: &str = "registration.rejected";
}

/// Operational defaults, overridable through configuration
pub mod system {
    /// Validity window applied at intake, in days
    pub const DEFAULT_VALIDITY_WINDOW_DAYS: i64 = 200;

    /// Minimum matcher confidence for an identity match to count
    pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.75;

    /// Bounded retry attempts against the identity source
    pub const DEFAULT_MATCH_ATTEMPTS: u32 = 3;

    /// Base delay of the exponential matcher backoff, in milliseconds
    pub const DEFAULT_MATCH_BACKOFF_MS: u64 = 100;

    /// Identity source request timeout, in milliseconds
    pub const DEFAULT_MATCH_TIMEOUT_MS: u64 = 5_000;
}
