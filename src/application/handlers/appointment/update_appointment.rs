//! UpdateAppointmentHandler - Command handler for admin field updates.

use std::sync::Arc;

use crate::domain::appointment::{
    Appointment, AppointmentError, AppointmentUpdated, ClinicService, ScheduleValidator,
};
use crate::domain::foundation::{
    AppointmentId, Clock, CommandMetadata, EventId, VeterinarianId,
};
use crate::ports::{AppointmentRepository, EventPublisher};

use super::{envelope_for, load, rejected};

/// Command to update descriptive fields of an appointment.
///
/// `None` leaves a field untouched. For the optional fields `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateAppointmentCommand {
    pub appointment_id: AppointmentId,
    pub service: Option<String>,
    pub reason: Option<String>,
    pub notes: Option<Option<String>>,
    pub vet_id: Option<Option<i64>>,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateAppointmentResult {
    pub appointment: Appointment,
    pub event: AppointmentUpdated,
}

/// Handler for admin updates.
///
/// Applies the setters, then re-validates the whole aggregate (including
/// the schedule policy) before saving.
pub struct UpdateAppointmentHandler {
    repository: Arc<dyn AppointmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    validator: ScheduleValidator,
}

impl UpdateAppointmentHandler {
    pub fn new(
        repository: Arc<dyn AppointmentRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        validator: ScheduleValidator,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            clock,
            validator,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateAppointmentCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateAppointmentResult, AppointmentError> {
        let id = cmd.appointment_id;
        let now = self.clock.now();

        // Parse raw input before touching the aggregate
        let service = cmd
            .service
            .as_deref()
            .map(str::parse::<ClinicService>)
            .transpose()
            .map_err(AppointmentError::from)
            .map_err(rejected("update", id))?;
        let vet_id = cmd
            .vet_id
            .map(|raw| raw.map(VeterinarianId::new).transpose())
            .transpose()
            .map_err(AppointmentError::from)
            .map_err(rejected("update", id))?;

        let mut appointment = load(self.repository.as_ref(), id).await?;

        let mut changed_fields = Vec::new();
        if let Some(service) = service {
            appointment.set_service(service, now);
            changed_fields.push("service".to_string());
        }
        if let Some(reason) = cmd.reason {
            appointment.set_reason(reason, now);
            changed_fields.push("reason".to_string());
        }
        if let Some(notes) = cmd.notes {
            appointment.set_notes(notes, now);
            changed_fields.push("notes".to_string());
        }
        if let Some(vet_id) = vet_id {
            appointment.set_vet_id(vet_id, now);
            changed_fields.push("vet_id".to_string());
        }
        if changed_fields.is_empty() {
            return Err(rejected("update", id)(AppointmentError::validation(
                "fields",
                "",
                "no fields to update",
            )));
        }

        appointment
            .validate_fields(&self.validator, now)
            .map_err(rejected("update", id))?;

        self.repository.save(&appointment).await?;

        let event = AppointmentUpdated {
            event_id: EventId::new(),
            appointment_id: id,
            changed_fields,
            updated_at: now,
        };
        let correlation_id = metadata.correlation_id();
        self.event_publisher
            .publish(envelope_for(&event, &metadata, &correlation_id))
            .await?;

        tracing::info!(
            appointment_id = %id,
            status = %appointment.status(),
            changed = ?event.changed_fields,
            correlation_id = %correlation_id,
            "appointment updated"
        );

        Ok(UpdateAppointmentResult { appointment, event })
    }
}
