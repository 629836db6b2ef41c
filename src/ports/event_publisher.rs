//! EventPublisher port - Interface for publishing domain events.
//!
//! Handlers publish `EventEnvelope`s without knowing where they go. The
//! production adapter writes them to the log; tests use the in-memory bus.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must propagate delivery errors to the caller.
///
/// # Example
///
/// ```ignore
/// let envelope = SaleCreated::from_sale(&sale)
///     .to_envelope()
///     .with_correlation_id(metadata.correlation_id());
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several events in order.
    ///
    /// Default implementation publishes sequentially and stops at the first
    /// failure.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}

    #[test]
    fn event_publisher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn EventPublisher>();
    }
}
