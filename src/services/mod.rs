//! Intake and lifecycle services consumed by the request-handling layer.

pub mod intake_service;
pub mod lifecycle_engine;

pub use intake_service::RegistrationIntakeService;
pub use lifecycle_engine::RegistrationLifecycleEngine;
