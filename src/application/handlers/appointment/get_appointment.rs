//! GetAppointmentHandler - Query handler for a single appointment.

use std::sync::Arc;

use crate::domain::appointment::{Appointment, AppointmentError};
use crate::domain::foundation::AppointmentId;
use crate::ports::AppointmentRepository;

use super::load;

/// Query to get an appointment by ID.
#[derive(Debug, Clone)]
pub struct GetAppointmentQuery {
    pub appointment_id: AppointmentId,
}

/// Handler for retrieving an appointment.
pub struct GetAppointmentHandler {
    repository: Arc<dyn AppointmentRepository>,
}

impl GetAppointmentHandler {
    pub fn new(repository: Arc<dyn AppointmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetAppointmentQuery) -> Result<Appointment, AppointmentError> {
        load(self.repository.as_ref(), query.appointment_id).await
    }
}
