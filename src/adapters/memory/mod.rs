//! In-memory persistence adapters for tests and local development.

mod in_memory_appointment_repository;

pub use in_memory_appointment_repository::InMemoryAppointmentRepository;
