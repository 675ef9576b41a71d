//! Appointment domain events.
//!
//! Events published after an appointment change has been persisted:
//! - `AppointmentCreated` - New appointment booked
//! - `AppointmentConfirmed` - Appointment confirmed (optionally with a vet)
//! - `AppointmentCancelled` - Appointment cancelled before the visit
//! - `AppointmentCompleted` - Visit took place
//! - `AppointmentRescheduled` - Visit moved to a new date
//! - `AppointmentMarkedNotPresented` - Owner did not show up
//! - `AppointmentUpdated` - Admin field update
//! - `AppointmentDeleted` - Appointment physically removed

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, AppointmentId, EventId, PetId, Timestamp, VeterinarianId,
};

use super::{AppointmentStatus, ClinicService};

// ════════════════════════════════════════════════════════════════════════════
// AppointmentCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new appointment is booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreated {
    pub event_id: EventId,
    pub appointment_id: AppointmentId,
    pub pet_id: PetId,
    pub owner_id: i64,
    pub vet_id: Option<VeterinarianId>,
    pub service: ClinicService,
    pub scheduled_date: Timestamp,
    pub created_at: Timestamp,
}

domain_event!(
    AppointmentCreated,
    event_type = "appointment.created.v1",
    aggregate_id = appointment_id,
    aggregate_type = "Appointment",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AppointmentConfirmed
// ════════════════════════════════════════════════════════════════════════════

/// Published when an appointment is confirmed.
///
/// The status stays pending; `vet_id` is the vet assigned after confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentConfirmed {
    pub event_id: EventId,
    pub appointment_id: AppointmentId,
    pub vet_id: Option<VeterinarianId>,
    pub confirmed_at: Timestamp,
}

domain_event!(
    AppointmentConfirmed,
    event_type = "appointment.confirmed.v1",
    aggregate_id = appointment_id,
    aggregate_type = "Appointment",
    occurred_at = confirmed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AppointmentCancelled
// ════════════════════════════════════════════════════════════════════════════

/// Published when an appointment is cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCancelled {
    pub event_id: EventId,
    pub appointment_id: AppointmentId,

    /// Status before cancellation (pending or rescheduled).
    pub previous_status: AppointmentStatus,

    pub reason: Option<String>,
    pub cancelled_at: Timestamp,
}

domain_event!(
    AppointmentCancelled,
    event_type = "appointment.cancelled.v1",
    aggregate_id = appointment_id,
    aggregate_type = "Appointment",
    occurred_at = cancelled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AppointmentCompleted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a visit is marked as completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCompleted {
    pub event_id: EventId,
    pub appointment_id: AppointmentId,
    pub completed_at: Timestamp,
}

domain_event!(
    AppointmentCompleted,
    event_type = "appointment.completed.v1",
    aggregate_id = appointment_id,
    aggregate_type = "Appointment",
    occurred_at = completed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AppointmentRescheduled
// ════════════════════════════════════════════════════════════════════════════

/// Published when a visit is moved to a new date.
///
/// Captures both dates for the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRescheduled {
    pub event_id: EventId,
    pub appointment_id: AppointmentId,
    pub previous_date: Timestamp,
    pub new_date: Timestamp,
    pub rescheduled_at: Timestamp,
}

domain_event!(
    AppointmentRescheduled,
    event_type = "appointment.rescheduled.v1",
    aggregate_id = appointment_id,
    aggregate_type = "Appointment",
    occurred_at = rescheduled_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AppointmentMarkedNotPresented
// ════════════════════════════════════════════════════════════════════════════

/// Published when the owner did not show up for the visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentMarkedNotPresented {
    pub event_id: EventId,
    pub appointment_id: AppointmentId,
    pub scheduled_date: Timestamp,
    pub marked_at: Timestamp,
}

domain_event!(
    AppointmentMarkedNotPresented,
    event_type = "appointment.not_presented.v1",
    aggregate_id = appointment_id,
    aggregate_type = "Appointment",
    occurred_at = marked_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AppointmentUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published after an admin field update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentUpdated {
    pub event_id: EventId,
    pub appointment_id: AppointmentId,

    /// Names of the fields that were set by the update.
    pub changed_fields: Vec<String>,

    pub updated_at: Timestamp,
}

domain_event!(
    AppointmentUpdated,
    event_type = "appointment.updated.v1",
    aggregate_id = appointment_id,
    aggregate_type = "Appointment",
    occurred_at = updated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// AppointmentDeleted
// ════════════════════════════════════════════════════════════════════════════

/// Published when an appointment is removed from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDeleted {
    pub event_id: EventId,
    pub appointment_id: AppointmentId,
    pub status: AppointmentStatus,
    pub deleted_at: Timestamp,
}

domain_event!(
    AppointmentDeleted,
    event_type = "appointment.deleted.v1",
    aggregate_id = appointment_id,
    aggregate_type = "Appointment",
    occurred_at = deleted_at,
    event_id = event_id
);
