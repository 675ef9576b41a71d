//! CompleteAppointmentHandler - Command handler for completing visits.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentCompleted, AppointmentError};
use crate::domain::foundation::{AppointmentId, Clock, CommandMetadata, EventId};
use crate::ports::{AppointmentRepository, EventPublisher};

use super::{envelope_for, load, rejected};

/// Command to mark a visit as completed.
#[derive(Debug, Clone)]
pub struct CompleteAppointmentCommand {
    pub appointment_id: AppointmentId,
}

/// Result of a successful completion.
#[derive(Debug, Clone)]
pub struct CompleteAppointmentResult {
    pub appointment: Appointment,
    pub event: AppointmentCompleted,
}

/// Handler for completing appointments.
pub struct CompleteAppointmentHandler {
    repository: Arc<dyn AppointmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CompleteAppointmentHandler {
    pub fn new(
        repository: Arc<dyn AppointmentRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteAppointmentCommand,
        metadata: CommandMetadata,
    ) -> Result<CompleteAppointmentResult, AppointmentError> {
        let id = cmd.appointment_id;
        let now = self.clock.now();

        let mut appointment = load(self.repository.as_ref(), id).await?;
        appointment.complete(now).map_err(rejected("complete", id))?;

        self.repository.save(&appointment).await?;

        let event = AppointmentCompleted {
            event_id: EventId::new(),
            appointment_id: id,
            completed_at: now,
        };
        let correlation_id = metadata.correlation_id();
        self.event_publisher
            .publish(envelope_for(&event, &metadata, &correlation_id))
            .await?;

        tracing::info!(
            appointment_id = %id,
            status = %appointment.status(),
            correlation_id = %correlation_id,
            "appointment completed"
        );

        Ok(CompleteAppointmentResult { appointment, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::appointment::test_support::Fixture;
    use crate::domain::appointment::AppointmentStatus;

    fn handler(fixture: &Fixture) -> CompleteAppointmentHandler {
        CompleteAppointmentHandler::new(
            fixture.repository.clone(),
            fixture.bus.clone(),
            fixture.clock.clone(),
        )
    }

    #[tokio::test]
    async fn completes_pending_appointment() {
        let fixture = Fixture::new();
        let seeded = fixture.seed_pending().await;

        let result = handler(&fixture)
            .handle(
                CompleteAppointmentCommand {
                    appointment_id: seeded.id(),
                },
                fixture.metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.appointment.status(), AppointmentStatus::Completed);
        assert_eq!(fixture.stored(&seeded).await.status(), AppointmentStatus::Completed);
        assert!(fixture.bus.has_event("appointment.completed.v1"));
    }

    #[tokio::test]
    async fn completing_cancelled_always_fails() {
        let fixture = Fixture::new();
        let seeded = fixture.seed_with_status(AppointmentStatus::Cancelled).await;
        let handler = handler(&fixture);

        for _ in 0..3 {
            let err = handler
                .handle(
                    CompleteAppointmentCommand {
                        appointment_id: seeded.id(),
                    },
                    fixture.metadata(),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, AppointmentError::StatusTransition { .. }));
        }
        assert_eq!(fixture.stored(&seeded).await.status(), AppointmentStatus::Cancelled);
        assert_eq!(fixture.bus.event_count(), 0);
    }
}
