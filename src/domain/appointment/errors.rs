//! Appointment-specific error types.
//!
//! # Error kinds
//!
//! | Error | Raised when |
//! |-------|-------------|
//! | Validation | a field breaks a structural constraint |
//! | Schedule | a requested date breaks clinic scheduling policy |
//! | StatusTransition | the current status forbids the operation |
//! | StatusValidation | the current status already satisfies (or forever forbids) the target |
//! | NotFound | no appointment with the given id |
//! | Infrastructure | repository or publisher failure |
//!
//! Every lifecycle operation checks its guards before mutating, so any of
//! these errors leaves the aggregate untouched.

use thiserror::Error;

use crate::domain::foundation::{
    AppointmentId, DomainError, ErrorCode, Timestamp, ValidationError,
};

use super::AppointmentStatus;

/// Scheduling rule a requested date violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleRule {
    ZeroDate,
    InPast,
    InsufficientLeadTime,
    Weekend,
}

impl ScheduleRule {
    /// Stable machine-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleRule::ZeroDate => "zero_date",
            ScheduleRule::InPast => "in_past",
            ScheduleRule::InsufficientLeadTime => "insufficient_lead_time",
            ScheduleRule::Weekend => "weekend",
        }
    }
}

/// A candidate date rejected by the scheduling policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Scheduled date {rejected} rejected ({}): {reason}", .rule.as_str())]
pub struct ScheduleValidationError {
    pub rejected: Timestamp,
    pub rule: ScheduleRule,
    pub reason: String,
}

impl ScheduleValidationError {
    pub fn new(rejected: Timestamp, rule: ScheduleRule, reason: impl Into<String>) -> Self {
        Self {
            rejected,
            rule,
            reason: reason.into(),
        }
    }
}

/// Appointment module errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppointmentError {
    #[error("Validation failed for '{field}' (value: {value}): {message}")]
    Validation {
        field: String,
        value: String,
        message: String,
    },

    #[error(transparent)]
    Schedule(#[from] ScheduleValidationError),

    #[error("Cannot transition appointment from {from} to {to}: {message}")]
    StatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
        message: String,
    },

    #[error("Appointment is {status}: {message}")]
    StatusValidation {
        status: AppointmentStatus,
        message: String,
    },

    #[error("Appointment not found: {0}")]
    NotFound(AppointmentId),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl AppointmentError {
    pub fn validation(
        field: impl Into<String>,
        value: impl ToString,
        message: impl Into<String>,
    ) -> Self {
        AppointmentError::Validation {
            field: field.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    pub fn status_transition(
        from: AppointmentStatus,
        to: AppointmentStatus,
        message: impl Into<String>,
    ) -> Self {
        AppointmentError::StatusTransition {
            from,
            to,
            message: message.into(),
        }
    }

    pub fn status_validation(status: AppointmentStatus, message: impl Into<String>) -> Self {
        AppointmentError::StatusValidation {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(id: AppointmentId) -> Self {
        AppointmentError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AppointmentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppointmentError::Validation { .. } => ErrorCode::ValidationFailed,
            AppointmentError::Schedule(_) => ErrorCode::ScheduleRejected,
            AppointmentError::StatusTransition { .. } => ErrorCode::InvalidStateTransition,
            AppointmentError::StatusValidation { .. } => ErrorCode::InvalidStatus,
            AppointmentError::NotFound(_) => ErrorCode::AppointmentNotFound,
            AppointmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<ValidationError> for AppointmentError {
    fn from(err: ValidationError) -> Self {
        let value = match &err {
            ValidationError::NonPositive { actual, .. }
            | ValidationError::OutOfRange { actual, .. } => actual.to_string(),
            ValidationError::EmptyField { .. } => String::new(),
            ValidationError::InvalidFormat { .. } => String::new(),
        };
        AppointmentError::Validation {
            field: err.field().to_string(),
            value,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for AppointmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => AppointmentError::Validation {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                value: String::new(),
                message: err.message,
            },
            _ => AppointmentError::Infrastructure(err.to_string()),
        }
    }
}
