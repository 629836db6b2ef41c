//! Event publisher that writes each envelope to the structured log.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Publishes domain events as `tracing` records.
///
/// There is no broker; downstream consumers read the log stream.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventPublisher;

impl LoggingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            correlation_id = event.metadata.correlation_id.as_deref().unwrap_or("-"),
            user_id = event.metadata.user_id.as_deref().unwrap_or("-"),
            payload = %event.payload,
            "domain event published"
        );
        Ok(())
    }
}
