//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory appointment repository
//! - `events` - In-memory event bus

pub mod events;
pub mod memory;

pub use events::InMemoryEventBus;
pub use memory::InMemoryAppointmentRepository;
