//! Appointment aggregate entity.
//!
//! An appointment links a pet, its owner, optionally a veterinarian, a
//! clinic service and a visit date. All lifecycle changes go through the
//! named operations below; each checks its guards first and only mutates
//! once every guard has passed.
//!
//! # Design Decisions
//!
//! - **Explicit time**: every operation receives `now`; nothing here reads
//!   the wall clock.
//! - **No confirmed state**: `confirm` keeps the status `Pending` and only
//!   assigns the veterinarian.
//! - **Rescheduling**: the new date only has to be in the future; the
//!   creation-time lead-time and weekend rules are not re-applied.
//! - **No persistence**: the repository assigns the id and stores the
//!   aggregate; concurrent writers are last-write-wins.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AppointmentId, PetId, StateMachine, Timestamp, VeterinarianId,
};

use super::{AppointmentError, AppointmentStatus, ClinicService, ScheduleValidator};

/// Input for `Appointment::create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub pet_id: PetId,
    pub owner_id: i64,
    pub vet_id: Option<VeterinarianId>,
    pub service: ClinicService,
    pub scheduled_date: Timestamp,
    pub reason: String,
    pub notes: Option<String>,
}

impl NewAppointment {
    pub fn new(
        pet_id: PetId,
        owner_id: i64,
        service: ClinicService,
        scheduled_date: Timestamp,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            pet_id,
            owner_id,
            vet_id: None,
            service,
            scheduled_date,
            reason: reason.into(),
            notes: None,
        }
    }

    /// Builder: assign a veterinarian up front.
    pub fn with_vet(mut self, vet_id: VeterinarianId) -> Self {
        self.vet_id = Some(vet_id);
        self
    }

    /// Builder: attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Appointment aggregate.
///
/// # Invariants
///
/// - `pet_id` is set and `owner_id > 0`
/// - `scheduled_date` is never the zero value
/// - `status` only changes through the lifecycle operations
/// - a freshly created appointment is `Pending` with a nil id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    id: AppointmentId,
    pet_id: PetId,
    owner_id: i64,
    vet_id: Option<VeterinarianId>,
    service: ClinicService,
    scheduled_date: Timestamp,
    status: AppointmentStatus,
    reason: String,
    notes: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Appointment {
    /// Create a new pending appointment.
    ///
    /// # Errors
    ///
    /// - `Validation` if `owner_id <= 0` or `reason` is blank
    /// - `Schedule` if the validator rejects `scheduled_date`
    pub fn create(
        new: NewAppointment,
        validator: &ScheduleValidator,
        now: Timestamp,
    ) -> Result<Self, AppointmentError> {
        if new.owner_id <= 0 {
            return Err(AppointmentError::validation(
                "owner_id",
                new.owner_id,
                "owner id must be positive",
            ));
        }
        if new.reason.trim().is_empty() {
            return Err(AppointmentError::validation(
                "reason",
                "",
                "a reason for the visit is required",
            ));
        }
        validator.validate_request_schedule(new.scheduled_date, now)?;

        Ok(Self {
            id: AppointmentId::NIL,
            pet_id: new.pet_id,
            owner_id: new.owner_id,
            vet_id: new.vet_id,
            service: new.service,
            scheduled_date: new.scheduled_date,
            status: AppointmentStatus::Pending,
            reason: new.reason,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an appointment from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AppointmentId,
        pet_id: PetId,
        owner_id: i64,
        vet_id: Option<VeterinarianId>,
        service: ClinicService,
        scheduled_date: Timestamp,
        status: AppointmentStatus,
        reason: String,
        notes: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            pet_id,
            owner_id,
            vet_id,
            service,
            scheduled_date,
            status,
            reason,
            notes,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn pet_id(&self) -> PetId {
        self.pet_id
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn vet_id(&self) -> Option<VeterinarianId> {
        self.vet_id
    }

    pub fn service(&self) -> ClinicService {
        self.service
    }

    pub fn scheduled_date(&self) -> Timestamp {
        self.scheduled_date
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Identity
    // ─────────────────────────────────────────────────────────────────────────

    /// Assigns the storage id on first save.
    ///
    /// # Errors
    ///
    /// - `Validation` if the appointment already has an id
    pub fn assign_id(&mut self, id: AppointmentId) -> Result<(), AppointmentError> {
        if !self.id.is_nil() {
            return Err(AppointmentError::validation(
                "id",
                self.id,
                "appointment already has an id",
            ));
        }
        self.id = id;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks structural invariants and re-runs the schedule policy.
    ///
    /// Used after admin field updates.
    pub fn validate_fields(
        &self,
        validator: &ScheduleValidator,
        now: Timestamp,
    ) -> Result<(), AppointmentError> {
        if self.id.is_nil() {
            return Err(AppointmentError::validation("id", self.id, "appointment id is required"));
        }
        if self.pet_id.value() <= 0 {
            return Err(AppointmentError::validation(
                "pet_id",
                self.pet_id,
                "pet id is required",
            ));
        }
        if self.owner_id <= 0 {
            return Err(AppointmentError::validation(
                "owner_id",
                self.owner_id,
                "owner id must be positive",
            ));
        }
        if self.scheduled_date.is_zero() {
            return Err(AppointmentError::validation(
                "scheduled_date",
                self.scheduled_date,
                "scheduled date is required",
            ));
        }
        validator.validate_request_schedule(self.scheduled_date, now)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Confirm the appointment, optionally assigning a veterinarian.
    ///
    /// The status stays `Pending`.
    ///
    /// # Errors
    ///
    /// - `StatusValidation` unless the appointment is pending
    pub fn confirm(
        &mut self,
        vet_id: Option<VeterinarianId>,
        now: Timestamp,
    ) -> Result<(), AppointmentError> {
        if self.status != AppointmentStatus::Pending {
            return Err(AppointmentError::status_validation(
                self.status,
                "only pending appointments can be confirmed",
            ));
        }
        let next = self.next_status(AppointmentStatus::Pending)?;

        if let Some(vet_id) = vet_id {
            self.vet_id = Some(vet_id);
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Cancel the appointment, recording an optional reason in the notes.
    ///
    /// # Errors
    ///
    /// - `StatusTransition` if completed or not presented
    /// - `StatusValidation` if already cancelled
    /// - `Validation` if the visit date has already passed
    pub fn cancel(&mut self, reason: Option<&str>, now: Timestamp) -> Result<(), AppointmentError> {
        match self.status {
            AppointmentStatus::Completed | AppointmentStatus::NotPresented => {
                return Err(AppointmentError::status_transition(
                    self.status,
                    AppointmentStatus::Cancelled,
                    format!("{} appointments cannot be cancelled", self.status),
                ));
            }
            AppointmentStatus::Cancelled => {
                return Err(AppointmentError::status_validation(
                    self.status,
                    "appointment is already cancelled",
                ));
            }
            AppointmentStatus::Pending | AppointmentStatus::Rescheduled => {}
        }
        if self.scheduled_date.is_before(&now) {
            return Err(AppointmentError::validation(
                "scheduled_date",
                self.scheduled_date,
                "cannot cancel an appointment whose date has already passed",
            ));
        }
        let next = self.next_status(AppointmentStatus::Cancelled)?;

        if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
            self.append_note(&format!("Cancellation reason: {}", reason));
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Mark the visit as completed.
    ///
    /// # Errors
    ///
    /// - `StatusValidation` if already completed
    /// - `StatusTransition` if cancelled or not presented
    pub fn complete(&mut self, now: Timestamp) -> Result<(), AppointmentError> {
        match self.status {
            AppointmentStatus::Completed => {
                return Err(AppointmentError::status_validation(
                    self.status,
                    "appointment is already completed",
                ));
            }
            AppointmentStatus::Cancelled => {
                return Err(AppointmentError::status_transition(
                    self.status,
                    AppointmentStatus::Completed,
                    "cannot complete a cancelled appointment",
                ));
            }
            _ => {}
        }
        self.status = self.next_status(AppointmentStatus::Completed)?;
        self.updated_at = now;
        Ok(())
    }

    /// Record that the owner did not show up.
    ///
    /// # Errors
    ///
    /// - `StatusValidation` if already marked as not presented
    /// - `StatusTransition` if cancelled or completed
    pub fn mark_as_not_presented(&mut self, now: Timestamp) -> Result<(), AppointmentError> {
        match self.status {
            AppointmentStatus::NotPresented => {
                return Err(AppointmentError::status_validation(
                    self.status,
                    "appointment is already marked as not presented",
                ));
            }
            AppointmentStatus::Cancelled => {
                return Err(AppointmentError::status_transition(
                    self.status,
                    AppointmentStatus::NotPresented,
                    "cannot mark a cancelled appointment as not presented",
                ));
            }
            _ => {}
        }
        self.status = self.next_status(AppointmentStatus::NotPresented)?;
        self.updated_at = now;
        Ok(())
    }

    /// Move the visit to `new_date`.
    ///
    /// # Errors
    ///
    /// - `StatusTransition` if completed, cancelled or not presented
    /// - `Validation` if `new_date` is not strictly after `now`
    pub fn reschedule(
        &mut self,
        new_date: Timestamp,
        now: Timestamp,
    ) -> Result<(), AppointmentError> {
        if matches!(
            self.status,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        ) {
            return Err(AppointmentError::status_transition(
                self.status,
                AppointmentStatus::Rescheduled,
                format!("{} appointments cannot be rescheduled", self.status),
            ));
        }
        let next = self.next_status(AppointmentStatus::Rescheduled)?;
        if !new_date.is_after(&now) {
            return Err(AppointmentError::validation(
                "scheduled_date",
                new_date,
                "new date must be in the future",
            ));
        }

        self.scheduled_date = new_date;
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin field updates (unguarded; follow with `validate_fields`)
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_service(&mut self, service: ClinicService, now: Timestamp) {
        self.service = service;
        self.updated_at = now;
    }

    pub fn set_reason(&mut self, reason: impl Into<String>, now: Timestamp) {
        self.reason = reason.into();
        self.updated_at = now;
    }

    pub fn set_notes(&mut self, notes: Option<String>, now: Timestamp) {
        self.notes = notes;
        self.updated_at = now;
    }

    pub fn set_vet_id(&mut self, vet_id: Option<VeterinarianId>, now: Timestamp) {
        self.vet_id = vet_id;
        self.updated_at = now;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Deletion
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks that the appointment may be physically removed.
    ///
    /// # Errors
    ///
    /// - `StatusValidation` if completed
    pub fn ensure_deletable(&self) -> Result<(), AppointmentError> {
        if self.status == AppointmentStatus::Completed {
            return Err(AppointmentError::status_validation(
                self.status,
                "completed appointments cannot be deleted",
            ));
        }
        Ok(())
    }

    fn next_status(&self, target: AppointmentStatus) -> Result<AppointmentStatus, AppointmentError> {
        self.status.transition_to(target).map_err(|_| {
            AppointmentError::status_transition(
                self.status,
                target,
                format!("{} is a terminal status", self.status),
            )
        })
    }

    fn append_note(&mut self, line: &str) {
        self.notes = Some(match self.notes.take() {
            Some(existing) if !existing.trim().is_empty() => format!("{}\n{}", existing, line),
            _ => line.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    // Friday; +5 days is a Wednesday
    fn friday() -> Timestamp {
        at("2025-01-10T09:00:00Z")
    }

    fn validator() -> ScheduleValidator {
        ScheduleValidator::default()
    }

    fn new_request(scheduled: Timestamp) -> NewAppointment {
        NewAppointment::new(
            PetId::new(11).unwrap(),
            7,
            ClinicService::Vaccination,
            scheduled,
            "Annual rabies shot",
        )
    }

    fn pending() -> Appointment {
        let mut appointment =
            Appointment::create(new_request(friday().add_days(5)), &validator(), friday()).unwrap();
        appointment.assign_id(AppointmentId::new(1).unwrap()).unwrap();
        appointment
    }

    fn with_status(status: AppointmentStatus) -> Appointment {
        let base = pending();
        Appointment::reconstitute(
            base.id(),
            base.pet_id(),
            base.owner_id(),
            base.vet_id(),
            base.service(),
            base.scheduled_date(),
            status,
            base.reason().to_string(),
            None,
            base.created_at(),
            base.updated_at(),
        )
    }

    // Creation

    #[test]
    fn create_starts_pending_with_nil_id() {
        let now = friday();
        let appointment =
            Appointment::create(new_request(now.add_days(5)), &validator(), now).unwrap();

        assert_eq!(appointment.status(), AppointmentStatus::Pending);
        assert!(appointment.id().is_nil());
        assert_eq!(appointment.created_at(), now);
        assert_eq!(appointment.updated_at(), now);
        assert!(appointment.vet_id().is_none());
    }

    #[test]
    fn create_keeps_optional_vet_and_notes() {
        let request = new_request(friday().add_days(5))
            .with_vet(VeterinarianId::new(3).unwrap())
            .with_notes("Nervous around dogs");
        let appointment = Appointment::create(request, &validator(), friday()).unwrap();

        assert_eq!(appointment.vet_id(), Some(VeterinarianId::new(3).unwrap()));
        assert_eq!(appointment.notes(), Some("Nervous around dogs"));
    }

    #[test]
    fn create_rejects_non_positive_owner() {
        let mut request = new_request(friday().add_days(5));
        request.owner_id = 0;
        let result = Appointment::create(request, &validator(), friday());
        assert!(matches!(result, Err(AppointmentError::Validation { field, .. }) if field == "owner_id"));
    }

    #[test]
    fn create_rejects_blank_reason() {
        let mut request = new_request(friday().add_days(5));
        request.reason = "   ".to_string();
        let result = Appointment::create(request, &validator(), friday());
        assert!(matches!(result, Err(AppointmentError::Validation { field, .. }) if field == "reason"));
    }

    #[test]
    fn create_rejects_date_inside_lead_time() {
        let result = Appointment::create(new_request(friday().add_days(1)), &validator(), friday());
        assert!(matches!(result, Err(AppointmentError::Schedule(_))));
    }

    #[test]
    fn assign_id_only_once() {
        let mut appointment = pending();
        let result = appointment.assign_id(AppointmentId::new(2).unwrap());
        assert!(result.is_err());
        assert_eq!(appointment.id().value(), 1);
    }

    // validate_fields

    #[test]
    fn validate_fields_requires_id() {
        let appointment =
            Appointment::create(new_request(friday().add_days(5)), &validator(), friday()).unwrap();
        let result = appointment.validate_fields(&validator(), friday());
        assert!(matches!(result, Err(AppointmentError::Validation { field, .. }) if field == "id"));
    }

    #[test]
    fn validate_fields_passes_for_fresh_appointment() {
        assert!(pending().validate_fields(&validator(), friday()).is_ok());
    }

    #[test]
    fn validate_fields_rejects_zero_date() {
        let base = pending();
        let broken = Appointment::reconstitute(
            base.id(),
            base.pet_id(),
            base.owner_id(),
            None,
            base.service(),
            Timestamp::zero(),
            base.status(),
            base.reason().to_string(),
            None,
            base.created_at(),
            base.updated_at(),
        );
        let result = broken.validate_fields(&validator(), friday());
        assert!(
            matches!(result, Err(AppointmentError::Validation { field, .. }) if field == "scheduled_date")
        );
    }

    #[test]
    fn stored_record_with_nil_pet_is_rejected() {
        let mut record = serde_json::to_value(pending()).unwrap();
        record["pet_id"] = serde_json::json!(0);

        let result = serde_json::from_value::<Appointment>(record);
        assert!(result.is_err());
    }

    #[test]
    fn stored_record_round_trips_through_serde() {
        let appointment = pending();
        let record = serde_json::to_value(&appointment).unwrap();
        assert_eq!(record["pet_id"], 11);

        let restored: Appointment = serde_json::from_value(record).unwrap();
        assert_eq!(restored, appointment);
        assert!(restored.validate_fields(&validator(), friday()).is_ok());
    }

    #[test]
    fn validate_fields_reruns_schedule_policy() {
        // Two days before the visit the lead time no longer holds
        let appointment = pending();
        let later = appointment.scheduled_date().minus_days(2);
        let result = appointment.validate_fields(&validator(), later);
        assert!(matches!(result, Err(AppointmentError::Schedule(_))));
    }

    // Confirm

    #[test]
    fn confirm_assigns_vet_and_stays_pending() {
        let mut appointment = pending();
        let later = friday().add_hours(2);
        appointment
            .confirm(Some(VeterinarianId::new(4).unwrap()), later)
            .unwrap();

        assert_eq!(appointment.status(), AppointmentStatus::Pending);
        assert_eq!(appointment.vet_id(), Some(VeterinarianId::new(4).unwrap()));
        assert_eq!(appointment.updated_at(), later);
    }

    #[test]
    fn confirm_without_vet_keeps_existing_vet() {
        let mut appointment = pending();
        appointment.set_vet_id(Some(VeterinarianId::new(8).unwrap()), friday());
        appointment.confirm(None, friday()).unwrap();
        assert_eq!(appointment.vet_id(), Some(VeterinarianId::new(8).unwrap()));
    }

    #[test]
    fn confirm_requires_pending() {
        for status in [
            AppointmentStatus::Rescheduled,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Completed,
            AppointmentStatus::NotPresented,
        ] {
            let mut appointment = with_status(status);
            let result = appointment.confirm(Some(VeterinarianId::new(4).unwrap()), friday());
            assert!(
                matches!(result, Err(AppointmentError::StatusValidation { .. })),
                "{:?}",
                status
            );
            assert!(appointment.vet_id().is_none());
        }
    }

    // Cancel

    #[test]
    fn cancel_twice_fails_second_time() {
        let mut appointment = pending();
        appointment.cancel(Some("no longer needed"), friday()).unwrap();
        assert_eq!(appointment.status(), AppointmentStatus::Cancelled);

        let result = appointment.cancel(Some("again"), friday());
        assert!(matches!(
            result,
            Err(AppointmentError::StatusValidation {
                status: AppointmentStatus::Cancelled,
                ..
            })
        ));
    }

    #[test]
    fn cancel_appends_reason_to_notes() {
        let request = new_request(friday().add_days(5)).with_notes("Bring vaccination card");
        let mut appointment = Appointment::create(request, &validator(), friday()).unwrap();

        appointment.cancel(Some("  moving away "), friday()).unwrap();

        assert_eq!(
            appointment.notes(),
            Some("Bring vaccination card\nCancellation reason: moving away")
        );
    }

    #[test]
    fn cancel_without_reason_leaves_notes() {
        let mut appointment = pending();
        appointment.cancel(None, friday()).unwrap();
        assert!(appointment.notes().is_none());
    }

    #[test]
    fn cancel_completed_is_a_transition_error() {
        let mut appointment = with_status(AppointmentStatus::Completed);
        let result = appointment.cancel(None, friday());
        assert!(matches!(
            result,
            Err(AppointmentError::StatusTransition {
                from: AppointmentStatus::Completed,
                to: AppointmentStatus::Cancelled,
                ..
            })
        ));
    }

    #[test]
    fn cancel_not_presented_is_a_transition_error() {
        let mut appointment = with_status(AppointmentStatus::NotPresented);
        let result = appointment.cancel(None, friday());
        assert!(matches!(result, Err(AppointmentError::StatusTransition { .. })));
    }

    #[test]
    fn cancel_after_visit_date_fails_without_mutation() {
        let mut appointment = pending();
        let before = appointment.clone();
        let after_visit = appointment.scheduled_date().add_days(1);

        let result = appointment.cancel(Some("forgot"), after_visit);

        assert!(
            matches!(result, Err(AppointmentError::Validation { field, .. }) if field == "scheduled_date")
        );
        assert_eq!(appointment, before);
    }

    #[test]
    fn rescheduled_can_be_cancelled() {
        let mut appointment = with_status(AppointmentStatus::Rescheduled);
        assert!(appointment.cancel(None, friday()).is_ok());
        assert_eq!(appointment.status(), AppointmentStatus::Cancelled);
    }

    // Complete

    #[test]
    fn complete_pending() {
        let mut appointment = pending();
        let later = friday().add_days(5);
        appointment.complete(later).unwrap();
        assert_eq!(appointment.status(), AppointmentStatus::Completed);
        assert_eq!(appointment.updated_at(), later);
    }

    #[test]
    fn complete_twice_is_a_status_validation_error() {
        let mut appointment = pending();
        appointment.complete(friday()).unwrap();
        let result = appointment.complete(friday());
        assert!(matches!(result, Err(AppointmentError::StatusValidation { .. })));
    }

    #[test]
    fn complete_cancelled_always_fails() {
        let mut appointment = with_status(AppointmentStatus::Cancelled);
        for _ in 0..3 {
            let result = appointment.complete(friday());
            assert!(matches!(result, Err(AppointmentError::StatusTransition { .. })));
            assert_eq!(appointment.status(), AppointmentStatus::Cancelled);
        }
    }

    #[test]
    fn complete_not_presented_is_rejected_as_terminal() {
        let mut appointment = with_status(AppointmentStatus::NotPresented);
        let result = appointment.complete(friday());
        assert!(matches!(
            result,
            Err(AppointmentError::StatusTransition {
                from: AppointmentStatus::NotPresented,
                ..
            })
        ));
    }

    // Not presented

    #[test]
    fn mark_not_presented_twice_fails() {
        let mut appointment = pending();
        appointment.mark_as_not_presented(friday()).unwrap();
        assert_eq!(appointment.status(), AppointmentStatus::NotPresented);

        let result = appointment.mark_as_not_presented(friday());
        assert!(matches!(result, Err(AppointmentError::StatusValidation { .. })));
    }

    #[test]
    fn mark_not_presented_rejects_cancelled_and_completed() {
        let mut cancelled = with_status(AppointmentStatus::Cancelled);
        assert!(matches!(
            cancelled.mark_as_not_presented(friday()),
            Err(AppointmentError::StatusTransition { .. })
        ));

        let mut completed = with_status(AppointmentStatus::Completed);
        assert!(matches!(
            completed.mark_as_not_presented(friday()),
            Err(AppointmentError::StatusTransition { .. })
        ));
    }

    // Reschedule

    #[test]
    fn reschedule_moves_date_and_status() {
        let mut appointment = pending();
        let new_date = friday().add_days(12);
        appointment.reschedule(new_date, friday()).unwrap();

        assert_eq!(appointment.scheduled_date(), new_date);
        assert_eq!(appointment.status(), AppointmentStatus::Rescheduled);
    }

    #[test]
    fn reschedule_skips_lead_time_and_weekend_rules() {
        let mut appointment = pending();
        // Saturday, one day out
        let saturday = friday().add_days(1);
        assert!(saturday.is_weekend());

        appointment.reschedule(saturday, friday()).unwrap();
        assert_eq!(appointment.scheduled_date(), saturday);
    }

    #[test]
    fn reschedule_to_past_fails_without_mutation() {
        let mut appointment = pending();
        let before = appointment.clone();

        let result = appointment.reschedule(friday().minus_days(1), friday());
        assert!(matches!(result, Err(AppointmentError::Validation { .. })));
        assert_eq!(appointment, before);

        let result = appointment.reschedule(friday(), friday());
        assert!(result.is_err());
        assert_eq!(appointment, before);
    }

    #[test]
    fn reschedule_rejects_terminal_statuses() {
        for status in [
            AppointmentStatus::Completed,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NotPresented,
        ] {
            let mut appointment = with_status(status);
            let result = appointment.reschedule(friday().add_days(8), friday());
            assert!(
                matches!(result, Err(AppointmentError::StatusTransition { .. })),
                "{:?}",
                status
            );
        }
    }

    #[test]
    fn rescheduled_can_be_rescheduled_again() {
        let mut appointment = pending();
        appointment.reschedule(friday().add_days(8), friday()).unwrap();
        appointment.reschedule(friday().add_days(9), friday()).unwrap();
        assert_eq!(appointment.scheduled_date(), friday().add_days(9));
    }

    // Field updates and deletion

    #[test]
    fn setters_refresh_updated_at() {
        let mut appointment = pending();
        let later = friday().add_hours(1);

        appointment.set_service(ClinicService::DentalCare, later);
        appointment.set_reason("Tartar cleanup", later);
        appointment.set_notes(Some("Fasting required".to_string()), later);

        assert_eq!(appointment.service(), ClinicService::DentalCare);
        assert_eq!(appointment.reason(), "Tartar cleanup");
        assert_eq!(appointment.notes(), Some("Fasting required"));
        assert_eq!(appointment.updated_at(), later);
    }

    #[test]
    fn completed_appointments_cannot_be_deleted() {
        let appointment = with_status(AppointmentStatus::Completed);
        assert!(matches!(
            appointment.ensure_deletable(),
            Err(AppointmentError::StatusValidation { .. })
        ));
    }

    #[test]
    fn other_statuses_can_be_deleted() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Rescheduled,
            AppointmentStatus::Cancelled,
            AppointmentStatus::NotPresented,
        ] {
            assert!(with_status(status).ensure_deletable().is_ok(), "{:?}", status);
        }
    }
}
