//! Ports - Interfaces between the domain and the outside world.
//!
//! - `AppointmentRepository` - Appointment persistence and listing
//! - `EventPublisher` - Domain event publishing

mod appointment_repository;
mod event_publisher;

pub use appointment_repository::{AppointmentRepository, AppointmentSearchCriteria};
pub use event_publisher::EventPublisher;
