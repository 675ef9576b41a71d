//! RescheduleAppointmentHandler - Command handler for moving a visit.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError, AppointmentRescheduled};
use crate::domain::foundation::{AppointmentId, Clock, CommandMetadata, EventId, Timestamp};
use crate::ports::{AppointmentRepository, EventPublisher};

use super::{envelope_for, load, rejected};

/// Command to move an appointment to a new date.
#[derive(Debug, Clone)]
pub struct RescheduleAppointmentCommand {
    pub appointment_id: AppointmentId,
    pub new_date: Timestamp,
}

/// Result of a successful reschedule.
#[derive(Debug, Clone)]
pub struct RescheduleAppointmentResult {
    pub appointment: Appointment,
    pub event: AppointmentRescheduled,
}

/// Handler for rescheduling appointments.
///
/// Only checks that the new date lies in the future; the booking lead time
/// and weekend rules apply to creation only.
pub struct RescheduleAppointmentHandler {
    repository: Arc<dyn AppointmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl RescheduleAppointmentHandler {
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
        cmd: RescheduleAppointmentCommand,
        metadata: CommandMetadata,
    ) -> Result<RescheduleAppointmentResult, AppointmentError> {
        let id = cmd.appointment_id;
        let now = self.clock.now();

        let mut appointment = load(self.repository.as_ref(), id).await?;
        let previous_date = appointment.scheduled_date();
        appointment
            .reschedule(cmd.new_date, now)
            .map_err(rejected("reschedule", id))?;

        self.repository.save(&appointment).await?;

        let event = AppointmentRescheduled {
            event_id: EventId::new(),
            appointment_id: id,
            previous_date,
            new_date: cmd.new_date,
            rescheduled_at: now,
        };
        let correlation_id = metadata.correlation_id();
        self.event_publisher
            .publish(envelope_for(&event, &metadata, &correlation_id))
            .await?;

        tracing::info!(
            appointment_id = %id,
            status = %appointment.status(),
            new_date = %cmd.new_date,
            correlation_id = %correlation_id,
            "appointment rescheduled"
        );

        Ok(RescheduleAppointmentResult { appointment, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::appointment::test_support::Fixture;
    use crate::domain::appointment::AppointmentStatus;

    fn handler(fixture: &Fixture) -> RescheduleAppointmentHandler {
        RescheduleAppointmentHandler::new(
            fixture.repository.clone(),
            fixture.bus.clone(),
            fixture.clock.clone(),
        )
    }

    #[tokio::test]
    async fn moves_date_and_records_both_dates() {
        let fixture = Fixture::new();
        let seeded = fixture.seed_pending().await;
        let new_date = fixture.now().add_days(12);

        let result = handler(&fixture)
            .handle(
                RescheduleAppointmentCommand {
                    appointment_id: seeded.id(),
                    new_date,
                },
                fixture.metadata(),
            )
            .await
            .unwrap();

        assert_eq!(result.appointment.status(), AppointmentStatus::Rescheduled);
        assert_eq!(result.event.previous_date, seeded.scheduled_date());
        assert_eq!(result.event.new_date, new_date);
        assert_eq!(fixture.stored(&seeded).await.scheduled_date(), new_date);
    }

    #[tokio::test]
    async fn past_date_leaves_stored_appointment_unchanged() {
        let fixture = Fixture::new();
        let seeded = fixture.seed_pending().await;

        let err = handler(&fixture)
            .handle(
                RescheduleAppointmentCommand {
                    appointment_id: seeded.id(),
                    new_date: fixture.now().minus_days(1),
                },
                fixture.metadata(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppointmentError::Validation { .. }));
        let stored = fixture.stored(&seeded).await;
        assert_eq!(stored.scheduled_date(), seeded.scheduled_date());
        assert_eq!(stored.status(), AppointmentStatus::Pending);
        assert_eq!(fixture.bus.event_count(), 0);
    }

    #[tokio::test]
    async fn completed_cannot_be_rescheduled() {
        let fixture = Fixture::new();
        let seeded = fixture.seed_with_status(AppointmentStatus::Completed).await;

        let err = handler(&fixture)
            .handle(
                RescheduleAppointmentCommand {
                    appointment_id: seeded.id(),
                    new_date: fixture.now().add_days(8),
                },
                fixture.metadata(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppointmentError::StatusTransition { .. }));
    }
}
