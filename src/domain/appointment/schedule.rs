//! Scheduling policy applied to requested visit dates.
//!
//! The validator enforces, in order:
//!
//! 1. the date is set (not the zero value)
//! 2. the date is not before `now`
//! 3. the date is at least `min_days_ahead` days after `now`
//! 4. the date is not a Saturday or Sunday (UTC)
//!
//! `max_days_ahead` and the opening hours are part of the policy but are
//! not checked against requested dates.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{ScheduleRule, ScheduleValidationError};

/// Minimum lead time, in days, between booking and visit.
pub const MIN_DAYS_TO_SCHEDULE: i64 = 3;

/// Furthest ahead, in days, a visit is meant to be bookable. Not enforced.
pub const MAX_DAYS_TO_SCHEDULE: i64 = 30;

/// Clinic opening hour (UTC). Not enforced.
pub const CLINIC_OPENING_HOUR: u32 = 8;

/// Clinic closing hour (UTC). Not enforced.
pub const CLINIC_CLOSING_HOUR: u32 = 20;

/// Tunable scheduling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePolicy {
    pub min_days_ahead: i64,
    pub max_days_ahead: i64,
    pub opening_hour: u32,
    pub closing_hour: u32,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            min_days_ahead: MIN_DAYS_TO_SCHEDULE,
            max_days_ahead: MAX_DAYS_TO_SCHEDULE,
            opening_hour: CLINIC_OPENING_HOUR,
            closing_hour: CLINIC_CLOSING_HOUR,
        }
    }
}

impl SchedulePolicy {
    /// Earliest instant a visit requested at `now` may be scheduled.
    pub fn earliest_bookable(&self, now: Timestamp) -> Timestamp {
        now.add_days(self.min_days_ahead)
    }

    /// Latest instant the booking window is meant to reach from `now`.
    pub fn latest_bookable(&self, now: Timestamp) -> Timestamp {
        now.add_days(self.max_days_ahead)
    }

    /// Returns true if `at` falls inside opening hours (UTC).
    pub fn is_within_opening_hours(&self, at: Timestamp) -> bool {
        (self.opening_hour..self.closing_hour).contains(&at.hour())
    }
}

/// Checks requested visit dates against a `SchedulePolicy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleValidator {
    policy: SchedulePolicy,
}

impl ScheduleValidator {
    pub fn new(policy: SchedulePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// Validates a requested visit date against the policy as of `now`.
    ///
    /// Returns the first violated rule.
    pub fn validate_request_schedule(
        &self,
        scheduled: Timestamp,
        now: Timestamp,
    ) -> Result<(), ScheduleValidationError> {
        if scheduled.is_zero() {
            return Err(ScheduleValidationError::new(
                scheduled,
                ScheduleRule::ZeroDate,
                "scheduled date is required",
            ));
        }

        if scheduled.is_before(&now) {
            return Err(ScheduleValidationError::new(
                scheduled,
                ScheduleRule::InPast,
                "scheduled date cannot be in the past",
            ));
        }

        if scheduled.is_before(&self.policy.earliest_bookable(now)) {
            return Err(ScheduleValidationError::new(
                scheduled,
                ScheduleRule::InsufficientLeadTime,
                format!(
                    "appointments must be scheduled at least {} days in advance",
                    self.policy.min_days_ahead
                ),
            ));
        }

        if scheduled.is_weekend() {
            return Err(ScheduleValidationError::new(
                scheduled,
                ScheduleRule::Weekend,
                format!("appointments cannot be scheduled on {}", scheduled.weekday()),
            ));
        }

        Ok(())
    }
}
