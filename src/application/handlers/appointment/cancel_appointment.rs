//! CancelAppointmentHandler - Command handler for cancelling appointments.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentCancelled, AppointmentError};
use crate::domain::foundation::{AppointmentId, Clock, CommandMetadata, EventId};
use crate::ports::{AppointmentRepository, EventPublisher};

use super::{envelope_for, load, rejected};

/// Command to cancel an appointment.
#[derive(Debug, Clone)]
pub struct CancelAppointmentCommand {
    pub appointment_id: AppointmentId,
    pub reason: Option<String>,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelAppointmentResult {
    pub appointment: Appointment,
    pub event: AppointmentCancelled,
}

/// Handler for cancelling appointments.
pub struct CancelAppointmentHandler {
    repository: Arc<dyn AppointmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl CancelAppointmentHandler {
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
        cmd: CancelAppointmentCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelAppointmentResult, AppointmentError> {
        let id = cmd.appointment_id;
        let now = self.clock.now();

        let mut appointment = load(self.repository.as_ref(), id).await?;
        let previous_status = appointment.status();
        appointment
            .cancel(cmd.reason.as_deref(), now)
            .map_err(rejected("cancel", id))?;

        self.repository.save(&appointment).await?;

        let event = AppointmentCancelled {
            event_id: EventId::new(),
            appointment_id: id,
            previous_status,
            reason: cmd.reason,
            cancelled_at: now,
        };
        let correlation_id = metadata.correlation_id();
        self.event_publisher
            .publish(envelope_for(&event, &metadata, &correlation_id))
            .await?;

        tracing::info!(
            appointment_id = %id,
            status = %appointment.status(),
            correlation_id = %correlation_id,
            "appointment cancelled"
        );

        Ok(CancelAppointmentResult { appointment, event })
    }
}
