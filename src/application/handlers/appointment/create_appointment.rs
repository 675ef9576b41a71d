//! CreateAppointmentHandler - Command handler for booking appointments.

use std::sync::Arc;

use crate::domain::appointment::{
    Appointment, AppointmentCreated, AppointmentError, ClinicService, NewAppointment,
    ScheduleValidator,
};
use crate::domain::foundation::{
    AppointmentId, Clock, CommandMetadata, EventId, PetId, Timestamp, VeterinarianId,
};
use crate::ports::{AppointmentRepository, EventPublisher};

use super::{envelope_for, rejected};

/// Command to book a new appointment.
///
/// Identifiers and the service arrive as raw input and are validated here.
#[derive(Debug, Clone)]
pub struct CreateAppointmentCommand {
    pub pet_id: i64,
    pub owner_id: i64,
    pub vet_id: Option<i64>,
    pub service: String,
    pub scheduled_date: Timestamp,
    pub reason: String,
    pub notes: Option<String>,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct CreateAppointmentResult {
    pub appointment: Appointment,
    pub event: AppointmentCreated,
}

/// Handler for booking appointments.
pub struct CreateAppointmentHandler {
    repository: Arc<dyn AppointmentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    validator: ScheduleValidator,
}

impl CreateAppointmentHandler {
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
        cmd: CreateAppointmentCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateAppointmentResult, AppointmentError> {
        let now = self.clock.now();

        // 1. Validate raw input
        let request = Self::parse(cmd).map_err(rejected("create", AppointmentId::NIL))?;

        // 2. Build the aggregate (runs the schedule policy)
        let mut appointment = Appointment::create(request, &self.validator, now)
            .map_err(rejected("create", AppointmentId::NIL))?;

        // 3. Persist and adopt the storage id
        let id = self.repository.save(&appointment).await?;
        appointment.assign_id(id)?;

        // 4. Publish event
        let event = AppointmentCreated {
            event_id: EventId::new(),
            appointment_id: id,
            pet_id: appointment.pet_id(),
            owner_id: appointment.owner_id(),
            vet_id: appointment.vet_id(),
            service: appointment.service(),
            scheduled_date: appointment.scheduled_date(),
            created_at: now,
        };
        let correlation_id = metadata.correlation_id();
        self.event_publisher
            .publish(envelope_for(&event, &metadata, &correlation_id))
            .await?;

        tracing::info!(
            appointment_id = %id,
            status = %appointment.status(),
            scheduled_date = %appointment.scheduled_date(),
            correlation_id = %correlation_id,
            "appointment created"
        );

        Ok(CreateAppointmentResult { appointment, event })
    }

    fn parse(cmd: CreateAppointmentCommand) -> Result<NewAppointment, AppointmentError> {
        let pet_id = PetId::new(cmd.pet_id)?;
        let service: ClinicService = cmd.service.parse()?;
        let mut request =
            NewAppointment::new(pet_id, cmd.owner_id, service, cmd.scheduled_date, cmd.reason);
        if let Some(raw) = cmd.vet_id {
            request = request.with_vet(VeterinarianId::new(raw)?);
        }
        if let Some(notes) = cmd.notes {
            request = request.with_notes(notes);
        }
        Ok(request)
    }
}
