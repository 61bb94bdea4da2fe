pub mod application_validation;
pub mod person;
pub mod proxy_application;

pub use application_validation::{ApplicationValidation, ValidationDecision};
pub use person::{Applicant, ProxyVoter};
pub use proxy_application::{NewProxyApplication, ProxyApplication};
