//! Scheduling policy configuration

use serde::Deserialize;

use crate::domain::appointment::{
    SchedulePolicy, ScheduleValidator, CLINIC_CLOSING_HOUR, CLINIC_OPENING_HOUR,
    MAX_DAYS_TO_SCHEDULE, MIN_DAYS_TO_SCHEDULE,
};

use super::error::ValidationError;

/// Upper bound for configured day counts (ten years).
pub const MAX_CONFIGURED_DAYS: i64 = 3650;

/// Scheduling configuration
///
/// Only the minimum lead time is enforced when booking; the window and the
/// opening hours are carried on the policy for reporting.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SchedulingConfig {
    /// Days between booking and the earliest allowed visit
    #[serde(default = "default_min_days_ahead")]
    pub min_days_ahead: i64,

    /// Furthest ahead a visit is meant to be bookable, in days
    #[serde(default = "default_max_days_ahead")]
    pub max_days_ahead: i64,

    /// Clinic opening hour (UTC)
    #[serde(default = "default_opening_hour")]
    pub opening_hour: u32,

    /// Clinic closing hour (UTC)
    #[serde(default = "default_closing_hour")]
    pub closing_hour: u32,
}

impl SchedulingConfig {
    /// Builds the domain policy from this configuration.
    pub fn to_policy(&self) -> SchedulePolicy {
        SchedulePolicy {
            min_days_ahead: self.min_days_ahead,
            max_days_ahead: self.max_days_ahead,
            opening_hour: self.opening_hour,
            closing_hour: self.closing_hour,
        }
    }

    /// Builds a validator for command handlers.
    pub fn validator(&self) -> ScheduleValidator {
        ScheduleValidator::new(self.to_policy())
    }

    /// Validate scheduling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_days_ahead < 0 {
            return Err(ValidationError::NegativeLeadTime(self.min_days_ahead));
        }
        for (field, value) in [
            ("min_days_ahead", self.min_days_ahead),
            ("max_days_ahead", self.max_days_ahead),
        ] {
            if value > MAX_CONFIGURED_DAYS {
                return Err(ValidationError::DaysOutOfRange {
                    field,
                    value,
                    limit: MAX_CONFIGURED_DAYS,
                });
            }
        }
        if self.max_days_ahead < self.min_days_ahead {
            return Err(ValidationError::BookingWindowInverted {
                min: self.min_days_ahead,
                max: self.max_days_ahead,
            });
        }
        for hour in [self.opening_hour, self.closing_hour] {
            if hour > 24 {
                return Err(ValidationError::InvalidHour(hour));
            }
        }
        if self.opening_hour >= self.closing_hour {
            return Err(ValidationError::OpeningAfterClosing {
                opening: self.opening_hour,
                closing: self.closing_hour,
            });
        }
        Ok(())
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            min_days_ahead: default_min_days_ahead(),
            max_days_ahead: default_max_days_ahead(),
            opening_hour: default_opening_hour(),
            closing_hour: default_closing_hour(),
        }
    }
}

fn default_min_days_ahead() -> i64 {
    MIN_DAYS_TO_SCHEDULE
}

fn default_max_days_ahead() -> i64 {
    MAX_DAYS_TO_SCHEDULE
}

fn default_opening_hour() -> u32 {
    CLINIC_OPENING_HOUR
}

fn default_closing_hour() -> u32 {
    CLINIC_CLOSING_HOUR
}
