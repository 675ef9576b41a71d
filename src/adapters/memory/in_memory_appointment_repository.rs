//! In-memory appointment repository.
//!
//! Keeps appointments in a map behind a tokio `RwLock` and hands out
//! sequential ids. Useful for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::appointment::Appointment;
use crate::domain::foundation::{
    AppointmentId, DomainError, ErrorCode, PetId, Timestamp, VeterinarianId,
};
use crate::ports::{AppointmentRepository, AppointmentSearchCriteria};

#[derive(Debug, Default)]
struct Store {
    appointments: HashMap<AppointmentId, Appointment>,
    last_id: i64,
}

/// In-memory storage for appointments.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAppointmentRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored appointments.
    pub async fn count(&self) -> usize {
        self.store.read().await.appointments.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        store.appointments.clear();
        store.last_id = 0;
    }

    async fn collect<F>(&self, filter: F) -> Vec<Appointment>
    where
        F: Fn(&Appointment) -> bool,
    {
        let store = self.store.read().await;
        let mut found: Vec<Appointment> = store
            .appointments
            .values()
            .filter(|a| filter(a))
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.scheduled_date(), a.id()));
        found
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn find_by_id(&self, id: AppointmentId) -> Result<Option<Appointment>, DomainError> {
        Ok(self.store.read().await.appointments.get(&id).cloned())
    }

    async fn save(&self, appointment: &Appointment) -> Result<AppointmentId, DomainError> {
        let mut store = self.store.write().await;
        let mut stored = appointment.clone();

        let id = if appointment.id().is_nil() {
            let id = AppointmentId::new(store.last_id + 1)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?;
            stored
                .assign_id(id)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?;
            id
        } else {
            appointment.id()
        };

        store.last_id = store.last_id.max(id.value());
        store.appointments.insert(id, stored);
        tracing::debug!(appointment_id = %id, "appointment saved");
        Ok(id)
    }

    async fn delete(&self, id: AppointmentId) -> Result<(), DomainError> {
        let removed = self.store.write().await.appointments.remove(&id);
        match removed {
            Some(_) => {
                tracing::debug!(appointment_id = %id, "appointment deleted");
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AppointmentNotFound,
                format!("Appointment {} not found", id),
            )),
        }
    }

    async fn list_all(&self) -> Result<Vec<Appointment>, DomainError> {
        Ok(self.collect(|_| true).await)
    }

    async fn list_by_owner_id(&self, owner_id: i64) -> Result<Vec<Appointment>, DomainError> {
        Ok(self.collect(|a| a.owner_id() == owner_id).await)
    }

    async fn list_by_vet_id(&self, vet_id: VeterinarianId) -> Result<Vec<Appointment>, DomainError> {
        Ok(self.collect(|a| a.vet_id() == Some(vet_id)).await)
    }

    async fn list_by_pet_id(&self, pet_id: PetId) -> Result<Vec<Appointment>, DomainError> {
        Ok(self.collect(|a| a.pet_id() == pet_id).await)
    }

    async fn list_by_date_range(
        &self,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<Appointment>, DomainError> {
        if to.is_before(&from) {
            return Err(DomainError::validation("to", "range end precedes range start"));
        }
        Ok(self
            .collect(|a| !a.scheduled_date().is_before(&from) && a.scheduled_date().is_before(&to))
            .await)
    }

    async fn search(
        &self,
        criteria: &AppointmentSearchCriteria,
    ) -> Result<Vec<Appointment>, DomainError> {
        let found = self.collect(|a| criteria.matches(a)).await;
        let page = found.into_iter().skip(criteria.offset);
        Ok(match criteria.limit {
            Some(limit) => page.take(limit).collect(),
            None => page.collect(),
        })
    }
}
