//! Lifecycle event publication.

pub mod publisher;

pub use publisher::{EventPublisher, PublishError, RegistrationEventEnvelope};
