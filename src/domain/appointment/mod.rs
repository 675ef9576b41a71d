//! Appointment domain module.
//!
//! Handles the appointment lifecycle: booking against the clinic schedule
//! policy, confirmation, cancellation, completion, rescheduling and no-shows.
//!
//! # Events
//!
//! - `AppointmentCreated` - Published when an appointment is booked
//! - `AppointmentConfirmed` - Published when an appointment is confirmed
//! - `AppointmentCancelled` - Published when an appointment is cancelled
//! - `AppointmentCompleted` - Published when the visit took place
//! - `AppointmentRescheduled` - Published when the visit is moved
//! - `AppointmentMarkedNotPresented` - Published when the owner did not show up
//! - `AppointmentUpdated` - Published after an admin field update
//! - `AppointmentDeleted` - Published when an appointment is removed

mod aggregate;
mod errors;
mod events;
mod schedule;
mod service;
mod status;

pub use aggregate::{Appointment, NewAppointment};
pub use errors::{AppointmentError, ScheduleRule, ScheduleValidationError};
pub use events::{
    AppointmentCancelled, AppointmentCompleted, AppointmentConfirmed, AppointmentCreated,
    AppointmentDeleted, AppointmentMarkedNotPresented, AppointmentRescheduled,
    AppointmentUpdated,
};
pub use schedule::{
    SchedulePolicy, ScheduleValidator, CLINIC_CLOSING_HOUR, CLINIC_OPENING_HOUR,
    MAX_DAYS_TO_SCHEDULE, MIN_DAYS_TO_SCHEDULE,
};
pub use service::ClinicService;
pub use status::AppointmentStatus;
