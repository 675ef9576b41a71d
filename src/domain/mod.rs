//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `appointment` - Appointment aggregate, status machine and schedule policy
pub mod appointment;
pub mod foundation;
