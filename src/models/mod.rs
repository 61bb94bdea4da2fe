pub mod core;

// Re-export core models for easy access
pub use core::{
    Applicant, ApplicationValidation, NewProxyApplication, ProxyApplication, ProxyVoter,
    ValidationDecision,
};
