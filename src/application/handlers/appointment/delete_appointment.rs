//! DeleteAppointmentHandler - Command handler for removing appointments.

use std::sync::Arc;

use crate::domain::appointment::{AppointmentDeleted, AppointmentError};
use crate::domain::foundation::{AppointmentId, Clock, CommandMetadata, EventId};
use crate::ports::{AppointmentRepository, EventPublisher};

use super::{envelope_for, load, rejected};

/// Command to physically remove an appointment.
#[derive(Debug, Clone)]
pub struct DeleteAppointmentCommand {
    pub appointment_id: AppointmentId,
}

/// Result of a successful deletion.
#[derive(Debug, Clone)]
pub struct DeleteAppointmentResult {
    pub event: AppointmentDeleted,
}

/// Handler for deleting appointments. Completed visits are kept.
pub struct DeleteAppointmentHandler {
    repository: Arc<dyn AppointmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl DeleteAppointmentHandler {
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
        cmd: DeleteAppointmentCommand,
        metadata: CommandMetadata,
    ) -> Result<DeleteAppointmentResult, AppointmentError> {
        let id = cmd.appointment_id;

        let appointment = load(self.repository.as_ref(), id).await?;
        appointment
            .ensure_deletable()
            .map_err(rejected("delete", id))?;

        self.repository.delete(id).await?;

        let event = AppointmentDeleted {
            event_id: EventId::new(),
            appointment_id: id,
            status: appointment.status(),
            deleted_at: self.clock.now(),
        };
        let correlation_id = metadata.correlation_id();
        self.event_publisher
            .publish(envelope_for(&event, &metadata, &correlation_id))
            .await?;

        tracing::info!(
            appointment_id = %id,
            status = %appointment.status(),
            correlation_id = %correlation_id,
            "appointment deleted"
        );

        Ok(DeleteAppointmentResult { event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::appointment::test_support::Fixture;
    use crate::domain::appointment::AppointmentStatus;
    use crate::ports::AppointmentRepository;

    fn handler(fixture: &Fixture) -> DeleteAppointmentHandler {
        DeleteAppointmentHandler::new(
            fixture.repository.clone(),
            fixture.bus.clone(),
            fixture.clock.clone(),
        )
    }

    #[tokio::test]
    async fn deletes_cancelled_appointment() {
        let fixture = Fixture::new();
        let seeded = fixture.seed_with_status(AppointmentStatus::Cancelled).await;

        let result = handler(&fixture)
            .handle(
                DeleteAppointmentCommand {
                    appointment_id: seeded.id(),
                },
                fixture.metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.event.status, AppointmentStatus::Cancelled);
        assert!(fixture.repository.find_by_id(seeded.id()).await.unwrap().is_none());
        assert!(fixture.bus.has_event("appointment.deleted.v1"));
    }

    #[tokio::test]
    async fn completed_appointment_is_kept() {
        let fixture = Fixture::new();
        let seeded = fixture.seed_with_status(AppointmentStatus::Completed).await;

        let err = handler(&fixture)
            .handle(
                DeleteAppointmentCommand {
                    appointment_id: seeded.id(),
                },
                fixture.metadata(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppointmentError::StatusValidation { .. }));
        assert_eq!(fixture.repository.count().await, 1);
    }

    #[tokio::test]
    async fn missing_appointment_is_not_found() {
        let fixture = Fixture::new();

        let err = handler(&fixture)
            .handle(
                DeleteAppointmentCommand {
                    appointment_id: AppointmentId::new(3).unwrap(),
                },
                fixture.metadata(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppointmentError::NotFound(_)));
    }
}
