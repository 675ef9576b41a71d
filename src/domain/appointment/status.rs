//! Appointment status state machine.
//!
//! `Pending` is the initial state. `Rescheduled` behaves like `Pending` for
//! every lifecycle operation except confirmation. `Completed`, `Cancelled`
//! and `NotPresented` are terminal.
//!
//! `Pending -> Pending` is the confirmation transition: there is no separate
//! confirmed state, so confirming keeps the appointment pending.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked and awaiting the visit.
    #[default]
    Pending,

    /// Cancelled before the visit.
    Cancelled,

    /// Visit took place.
    Completed,

    /// Moved to a new date; otherwise still open.
    Rescheduled,

    /// Owner did not show up.
    NotPresented,
}

impl AppointmentStatus {
    /// All statuses, in declaration order.
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
        AppointmentStatus::Rescheduled,
        AppointmentStatus::NotPresented,
    ];

    /// Wire/storage name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Rescheduled => "rescheduled",
            AppointmentStatus::NotPresented => "not_presented",
        }
    }

    /// Returns true if the raw string names a known status.
    pub fn is_valid(raw: &str) -> bool {
        raw.parse::<AppointmentStatus>().is_ok()
    }

    /// Returns true while the visit is still expected to happen.
    pub fn is_open(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Rescheduled)
    }
}

impl StateMachine for AppointmentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, target),
            // Confirmation keeps the status
            (Pending, Pending)
                | (Pending, Cancelled)
                | (Pending, Completed)
                | (Pending, Rescheduled)
                | (Pending, NotPresented)
                | (Rescheduled, Cancelled)
                | (Rescheduled, Completed)
                | (Rescheduled, Rescheduled)
                | (Rescheduled, NotPresented)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AppointmentStatus::*;
        match self {
            Pending => vec![Pending, Cancelled, Completed, Rescheduled, NotPresented],
            Rescheduled => vec![Cancelled, Completed, Rescheduled, NotPresented],
            Cancelled | Completed | NotPresented => vec![],
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown status '{}'", s))
            })
    }
}
