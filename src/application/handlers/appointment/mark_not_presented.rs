//! MarkNotPresentedHandler - Command handler for recording no-shows.

use std::sync::Arc;

use crate::domain::appointment::{
    Appointment, AppointmentError, AppointmentMarkedNotPresented,
};
use crate::domain::foundation::{AppointmentId, Clock, CommandMetadata, EventId};
use crate::ports::{AppointmentRepository, EventPublisher};

use super::{envelope_for, load, rejected};

/// Command to record that the owner did not show up.
#[derive(Debug, Clone)]
pub struct MarkNotPresentedCommand {
    pub appointment_id: AppointmentId,
}

/// Result of a successful no-show record.
#[derive(Debug, Clone)]
pub struct MarkNotPresentedResult {
    pub appointment: Appointment,
    pub event: AppointmentMarkedNotPresented,
}

/// Handler for marking appointments as not presented.
pub struct MarkNotPresentedHandler {
    repository: Arc<dyn AppointmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl MarkNotPresentedHandler {
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
        cmd: MarkNotPresentedCommand,
        metadata: CommandMetadata,
    ) -> Result<MarkNotPresentedResult, AppointmentError> {
        let id = cmd.appointment_id;
        let now = self.clock.now();

        let mut appointment = load(self.repository.as_ref(), id).await?;
        appointment
            .mark_as_not_presented(now)
            .map_err(rejected("mark_not_presented", id))?;

        self.repository.save(&appointment).await?;

        let event = AppointmentMarkedNotPresented {
            event_id: EventId::new(),
            appointment_id: id,
            scheduled_date: appointment.scheduled_date(),
            marked_at: now,
        };
        let correlation_id = metadata.correlation_id();
        self.event_publisher
            .publish(envelope_for(&event, &metadata, &correlation_id))
            .await?;

        tracing::info!(
            appointment_id = %id,
            status = %appointment.status(),
            correlation_id = %correlation_id,
            "appointment marked as not presented"
        );

        Ok(MarkNotPresentedResult { appointment, event })
    }
}
