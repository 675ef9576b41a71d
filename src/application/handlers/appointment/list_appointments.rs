//! ListAppointmentsHandler - Query handler for appointment listings.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError};
use crate::domain::foundation::{PetId, Timestamp, VeterinarianId};
use crate::ports::{AppointmentRepository, AppointmentSearchCriteria};

/// Listing to run. Identifiers arrive as raw input.
#[derive(Debug, Clone)]
pub enum ListAppointmentsQuery {
    All,
    ByOwner(i64),
    ByVet(i64),
    ByPet(i64),
    ByDateRange { from: Timestamp, to: Timestamp },
    Search(AppointmentSearchCriteria),
}

/// Handler for appointment listings, ordered by visit date.
pub struct ListAppointmentsHandler {
    repository: Arc<dyn AppointmentRepository>,
}

impl ListAppointmentsHandler {
    pub fn new(repository: Arc<dyn AppointmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListAppointmentsQuery,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let found = match query {
            ListAppointmentsQuery::All => self.repository.list_all().await?,
            ListAppointmentsQuery::ByOwner(owner_id) => {
                if owner_id <= 0 {
                    return Err(AppointmentError::validation(
                        "owner_id",
                        owner_id,
                        "owner id must be positive",
                    ));
                }
                self.repository.list_by_owner_id(owner_id).await?
            }
            ListAppointmentsQuery::ByVet(raw) => {
                self.repository
                    .list_by_vet_id(VeterinarianId::new(raw)?)
                    .await?
            }
            ListAppointmentsQuery::ByPet(raw) => {
                self.repository.list_by_pet_id(PetId::new(raw)?).await?
            }
            ListAppointmentsQuery::ByDateRange { from, to } => {
                self.repository.list_by_date_range(from, to).await?
            }
            ListAppointmentsQuery::Search(criteria) => self.repository.search(&criteria).await?,
        };
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::appointment::test_support::Fixture;
    use crate::domain::appointment::AppointmentStatus;

    #[tokio::test]
    async fn lists_by_pet_and_owner() {
        let fixture = Fixture::new();
        let seeded = fixture.seed_pending().await;
        let handler = ListAppointmentsHandler::new(fixture.repository.clone());

        let by_pet = handler
            .handle(ListAppointmentsQuery::ByPet(seeded.pet_id().value()))
            .await
            .unwrap();
        assert_eq!(by_pet, vec![seeded.clone()]);

        let by_owner = handler
            .handle(ListAppointmentsQuery::ByOwner(seeded.owner_id()))
            .await
            .unwrap();
        assert_eq!(by_owner.len(), 1);

        let nobody = handler.handle(ListAppointmentsQuery::ByOwner(999)).await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn invalid_raw_ids_are_rejected() {
        let fixture = Fixture::new();
        let handler = ListAppointmentsHandler::new(fixture.repository.clone());

        let err = handler.handle(ListAppointmentsQuery::ByVet(0)).await.unwrap_err();
        assert!(matches!(err, AppointmentError::Validation { field, .. } if field == "vet_id"));

        let err = handler.handle(ListAppointmentsQuery::ByOwner(-4)).await.unwrap_err();
        assert!(matches!(err, AppointmentError::Validation { field, .. } if field == "owner_id"));
    }

    #[tokio::test]
    async fn search_by_status() {
        let fixture = Fixture::new();
        fixture.seed_pending().await;
        fixture.seed_with_status(AppointmentStatus::Cancelled).await;
        let handler = ListAppointmentsHandler::new(fixture.repository.clone());

        let cancelled = handler
            .handle(ListAppointmentsQuery::Search(
                AppointmentSearchCriteria::new().with_status(AppointmentStatus::Cancelled),
            ))
            .await
            .unwrap();

        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].status(), AppointmentStatus::Cancelled);

        let all = handler.handle(ListAppointmentsQuery::All).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
