//! EventPublisher port - Interface for publishing domain events.
//!
//! Command handlers publish appointment events through this port after the
//! aggregate has been saved, without knowing the transport behind it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must propagate delivery errors to the caller.
///
/// # Example
///
/// ```ignore
/// let envelope = AppointmentCancelled { .. }
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
    /// Stops at the first failure; earlier events stay published.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
