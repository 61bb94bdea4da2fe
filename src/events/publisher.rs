use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tokio::sync::broadcast;

/// Broadcast publisher for registration lifecycle events.
///
/// Subscribers are optional: intake and validation must not depend on
/// anyone listening, so a send with no receivers is a successful publish.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<RegistrationEventEnvelope>,
}

/// A published lifecycle event
#[derive(Debug, Clone)]
pub struct RegistrationEventEnvelope {
    /// Event name from [`crate::constants::events`]
    pub name: String,
    pub department: String,
    pub registration_id: String,
    pub context: Value,
    pub published_at: DateTime<Utc>,
}

impl EventPublisher {
    /// Create a new publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a lifecycle event for one registration
    pub fn publish_registration(
        &self,
        event_name: &str,
        department: &str,
        registration_id: &str,
        context: Value,
    ) -> Result<(), PublishError> {
        let envelope = RegistrationEventEnvelope {
            name: event_name.to_string(),
            department: department.to_string(),
            registration_id: registration_id.to_string(),
            context,
            published_at: Utc::now(),
        };

        match self.sender.send(envelope) {
            Ok(_) => Ok(()),
            // No subscribers is an acceptable outcome
            Err(broadcast::error::SendError(_)) => Ok(()),
        }
    }

    /// Publish a status-transition event
    pub fn publish_transition(
        &self,
        event_name: &str,
        department: &str,
        registration_id: &str,
        from_state: &str,
        to_state: &str,
    ) -> Result<(), PublishError> {
        self.publish_registration(
            event_name,
            department,
            registration_id,
            json!({ "from": from_state, "to": to_state }),
        )
    }

    /// Subscribe to lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<RegistrationEventEnvelope> {
        self.sender.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(1000)
    }
}

/// Error types for event publishing
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Event channel is closed")]
    ChannelClosed,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::events;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let publisher = EventPublisher::default();
        publisher
            .publish_registration(events::REGISTRATION_SUBMITTED, "75001", "reg-1", json!({}))
            .unwrap();
    }

    #[tokio::test]
    async fn test_subscriber_receives_transition() {
        let publisher = EventPublisher::new(16);
        let mut receiver = publisher.subscribe();

        publisher
            .publish_transition(
                events::REGISTRATION_VALIDATED,
                "75001",
                "reg-1",
                "pending_validation",
                "validated",
            )
            .unwrap();

        let envelope = receiver.recv().await.unwrap();
        assert_eq!(envelope.name, events::REGISTRATION_VALIDATED);
        assert_eq!(envelope.department, "75001");
        assert_eq!(envelope.registration_id, "reg-1");
        assert_eq!(envelope.context["to"], "validated");
    }

    #[tokio::test]
    async fn test_subscriber_count() {
        let publisher = EventPublisher::new(4);
        assert_eq!(publisher.subscriber_count(), 0);
        let _receiver = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 1);
    }
}
