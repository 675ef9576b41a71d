//! Appointment command and query handlers.
//!
//! Every command follows the same sequence: load the aggregate, run one
//! lifecycle operation, save, then publish the resulting event. A rejected
//! guard returns before anything is saved or published.

mod cancel_appointment;
mod complete_appointment;
mod confirm_appointment;
mod create_appointment;
mod delete_appointment;
mod get_appointment;
mod list_appointments;
mod mark_not_presented;
mod reschedule_appointment;
mod update_appointment;

pub use cancel_appointment::{
    CancelAppointmentCommand, CancelAppointmentHandler, CancelAppointmentResult,
};
pub use complete_appointment::{
    CompleteAppointmentCommand, CompleteAppointmentHandler, CompleteAppointmentResult,
};
pub use confirm_appointment::{
    ConfirmAppointmentCommand, ConfirmAppointmentHandler, ConfirmAppointmentResult,
};
pub use create_appointment::{
    CreateAppointmentCommand, CreateAppointmentHandler, CreateAppointmentResult,
};
pub use delete_appointment::{
    DeleteAppointmentCommand, DeleteAppointmentHandler, DeleteAppointmentResult,
};
pub use get_appointment::{GetAppointmentHandler, GetAppointmentQuery};
pub use list_appointments::{ListAppointmentsHandler, ListAppointmentsQuery};
pub use mark_not_presented::{
    MarkNotPresentedCommand, MarkNotPresentedHandler, MarkNotPresentedResult,
};
pub use reschedule_appointment::{
    RescheduleAppointmentCommand, RescheduleAppointmentHandler, RescheduleAppointmentResult,
};
pub use update_appointment::{
    UpdateAppointmentCommand, UpdateAppointmentHandler, UpdateAppointmentResult,
};

use crate::domain::appointment::{Appointment, AppointmentError};
use crate::domain::foundation::{
    AppointmentId, CommandMetadata, EventEnvelope, SerializableDomainEvent,
};
use crate::ports::AppointmentRepository;

/// Loads an appointment or fails with `NotFound`.
async fn load(
    repository: &dyn AppointmentRepository,
    id: AppointmentId,
) -> Result<Appointment, AppointmentError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppointmentError::not_found(id))
}

/// Wraps an event with the command's correlation and user metadata.
fn envelope_for<E: SerializableDomainEvent>(
    event: &E,
    metadata: &CommandMetadata,
    correlation_id: &str,
) -> EventEnvelope {
    let envelope = event
        .to_envelope()
        .with_correlation_id(correlation_id)
        .with_user_id(metadata.user_id.to_string());
    match metadata.trace_id() {
        Some(trace_id) => envelope.with_trace_id(trace_id),
        None => envelope,
    }
}

/// Logs a rejected command and passes the error through.
fn rejected(
    operation: &'static str,
    id: AppointmentId,
) -> impl FnOnce(AppointmentError) -> AppointmentError {
    move |err| {
        tracing::warn!(
            appointment_id = %id,
            operation,
            code = %err.code(),
            error = %err,
            "appointment command rejected"
        );
        err
    }
}
