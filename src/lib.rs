//! Clinic Appointments - Appointment lifecycle and scheduling engine
//!
//! This crate implements booking, confirmation, cancellation, completion,
//! rescheduling and no-show tracking for veterinary clinic appointments,
//! including the scheduling policy every booking is validated against.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
