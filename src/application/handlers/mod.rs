//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod appointment;

pub use appointment::{
    CancelAppointmentCommand, CancelAppointmentHandler, CancelAppointmentResult,
    CompleteAppointmentCommand, CompleteAppointmentHandler, CompleteAppointmentResult,
    ConfirmAppointmentCommand, ConfirmAppointmentHandler, ConfirmAppointmentResult,
    CreateAppointmentCommand, CreateAppointmentHandler, CreateAppointmentResult,
    DeleteAppointmentCommand, DeleteAppointmentHandler, DeleteAppointmentResult,
    GetAppointmentHandler, GetAppointmentQuery, ListAppointmentsHandler, ListAppointmentsQuery,
    MarkNotPresentedCommand, MarkNotPresentedHandler, MarkNotPresentedResult,
    RescheduleAppointmentCommand, RescheduleAppointmentHandler, RescheduleAppointmentResult,
    UpdateAppointmentCommand, UpdateAppointmentHandler, UpdateAppointmentResult,
};
