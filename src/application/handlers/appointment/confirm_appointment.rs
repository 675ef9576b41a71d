//! ConfirmAppointmentHandler - Command handler for confirming appointments.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentConfirmed, AppointmentError};
use crate::domain::foundation::{
    AppointmentId, Clock, CommandMetadata, EventId, VeterinarianId,
};
use crate::ports::{AppointmentRepository, EventPublisher};

use super::{envelope_for, load, rejected};

/// Command to confirm a pending appointment.
#[derive(Debug, Clone)]
pub struct ConfirmAppointmentCommand {
    pub appointment_id: AppointmentId,
    /// Raw veterinarian id to assign, if any.
    pub vet_id: Option<i64>,
}

/// Result of a successful confirmation.
#[derive(Debug, Clone)]
pub struct ConfirmAppointmentResult {
    pub appointment: Appointment,
    pub event: AppointmentConfirmed,
}

/// Handler for confirming appointments.
pub struct ConfirmAppointmentHandler {
    repository: Arc<dyn AppointmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl ConfirmAppointmentHandler {
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
        cmd: ConfirmAppointmentCommand,
        metadata: CommandMetadata,
    ) -> Result<ConfirmAppointmentResult, AppointmentError> {
        let id = cmd.appointment_id;
        let now = self.clock.now();

        let vet_id = cmd
            .vet_id
            .map(VeterinarianId::new)
            .transpose()
            .map_err(AppointmentError::from)
            .map_err(rejected("confirm", id))?;

        let mut appointment = load(self.repository.as_ref(), id).await?;
        appointment
            .confirm(vet_id, now)
            .map_err(rejected("confirm", id))?;

        self.repository.save(&appointment).await?;

        let event = AppointmentConfirmed {
            event_id: EventId::new(),
            appointment_id: id,
            vet_id: appointment.vet_id(),
            confirmed_at: now,
        };
        let correlation_id = metadata.correlation_id();
        self.event_publisher
            .publish(envelope_for(&event, &metadata, &correlation_id))
            .await?;

        tracing::info!(
            appointment_id = %id,
            status = %appointment.status(),
            correlation_id = %correlation_id,
            "appointment confirmed"
        );

        Ok(ConfirmAppointmentResult { appointment, event })
    }
}
