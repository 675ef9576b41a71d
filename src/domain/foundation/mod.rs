//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the clock port, the state machine
//! trait, event infrastructure and error types that form the vocabulary of
//! the clinic domain.

mod clock;
mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{AppointmentId, PetId, UserId, VeterinarianId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
