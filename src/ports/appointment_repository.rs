//! Appointment repository port.
//!
//! Defines the contract for persisting and retrieving Appointment aggregates.
//! The lifecycle engine only needs `find_by_id`, `save` and `delete`; the
//! listing operations serve the query handlers.
//!
//! # Design
//!
//! - **Id assignment**: `save` assigns an id to an aggregate that has none
//! - **Last write wins**: no version token is checked on save
//! - **Ordering**: every listing is ordered by `scheduled_date` ascending

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::appointment::{Appointment, AppointmentStatus, ClinicService};
use crate::domain::foundation::{AppointmentId, DomainError, PetId, Timestamp, VeterinarianId};

/// Filters for `AppointmentRepository::search`.
///
/// Every `Some` filter must match; `text` is a case-insensitive substring
/// match against reason and notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSearchCriteria {
    pub owner_id: Option<i64>,
    pub pet_id: Option<PetId>,
    pub vet_id: Option<VeterinarianId>,
    pub status: Option<AppointmentStatus>,
    pub service: Option<ClinicService>,
    /// Inclusive lower bound on `scheduled_date`.
    pub from: Option<Timestamp>,
    /// Exclusive upper bound on `scheduled_date`.
    pub to: Option<Timestamp>,
    pub text: Option<String>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl AppointmentSearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owner(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn with_pet(mut self, pet_id: PetId) -> Self {
        self.pet_id = Some(pet_id);
        self
    }

    pub fn with_vet(mut self, vet_id: VeterinarianId) -> Self {
        self.vet_id = Some(vet_id);
        self
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_service(mut self, service: ClinicService) -> Self {
        self.service = Some(service);
        self
    }

    pub fn between(mut self, from: Timestamp, to: Timestamp) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn paged(mut self, limit: usize, offset: usize) -> Self {
        self.limit = Some(limit);
        self.offset = offset;
        self
    }

    /// Returns true if the appointment satisfies every filter (paging aside).
    pub fn matches(&self, appointment: &Appointment) -> bool {
        if self.owner_id.is_some_and(|owner| owner != appointment.owner_id()) {
            return false;
        }
        if self.pet_id.is_some_and(|pet| pet != appointment.pet_id()) {
            return false;
        }
        if self.vet_id.is_some() && self.vet_id != appointment.vet_id() {
            return false;
        }
        if self.status.is_some_and(|status| status != appointment.status()) {
            return false;
        }
        if self.service.is_some_and(|service| service != appointment.service()) {
            return false;
        }
        let scheduled = appointment.scheduled_date();
        if self.from.is_some_and(|from| scheduled.is_before(&from)) {
            return false;
        }
        if self.to.is_some_and(|to| !scheduled.is_before(&to)) {
            return false;
        }
        match self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            None => true,
            Some(text) => {
                let needle = text.to_lowercase();
                appointment.reason().to_lowercase().contains(&needle)
                    || appointment
                        .notes()
                        .is_some_and(|notes| notes.to_lowercase().contains(&needle))
            }
        }
    }
}

/// Repository port for Appointment aggregate persistence.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Find an appointment by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, DomainError>;

    /// Insert or overwrite an appointment.
    ///
    /// Aggregates with a nil id are inserted under a newly assigned id;
    /// any other id is stored as given (last write wins).
    /// Returns the id the appointment is stored under.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, appointment: &Appointment) -> Result<AppointmentId, DomainError>;

    /// Remove an appointment.
    ///
    /// # Errors
    ///
    /// - `AppointmentNotFound` if the appointment doesn't exist
    async fn delete(&self, id: AppointmentId) -> Result<(), DomainError>;

    async fn list_all(&self) -> Result<Vec<Appointment>, DomainError>;

    async fn list_by_owner_id(&self, owner_id: i64) -> Result<Vec<Appointment>, DomainError>;

    async fn list_by_vet_id(&self, vet_id: VeterinarianId) -> Result<Vec<Appointment>, DomainError>;

    async fn list_by_pet_id(&self, pet_id: PetId) -> Result<Vec<Appointment>, DomainError>;

    /// Appointments with `from <= scheduled_date < to`.
    async fn list_by_date_range(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Appointment>, DomainError>;

    async fn search(
        &self,
        criteria: &AppointmentSearchCriteria,
    ) -> Result<Vec<Appointment>, DomainError>;
}
