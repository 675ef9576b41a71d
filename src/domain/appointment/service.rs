//! Catalog of services offered by the clinic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Kind of visit an appointment is booked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicService {
    Consultation,
    Vaccination,
    Surgery,
    DentalCare,
    Grooming,
    Deworming,
    Checkup,
    Emergency,
}

impl ClinicService {
    /// The full catalog.
    pub const ALL: [ClinicService; 8] = [
        ClinicService::Consultation,
        ClinicService::Vaccination,
        ClinicService::Surgery,
        ClinicService::DentalCare,
        ClinicService::Grooming,
        ClinicService::Deworming,
        ClinicService::Checkup,
        ClinicService::Emergency,
    ];

    /// Wire/storage name of the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicService::Consultation => "consultation",
            ClinicService::Vaccination => "vaccination",
            ClinicService::Surgery => "surgery",
            ClinicService::DentalCare => "dental_care",
            ClinicService::Grooming => "grooming",
            ClinicService::Deworming => "deworming",
            ClinicService::Checkup => "checkup",
            ClinicService::Emergency => "emergency",
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ClinicService::Consultation => "Consultation",
            ClinicService::Vaccination => "Vaccination",
            ClinicService::Surgery => "Surgery",
            ClinicService::DentalCare => "Dental care",
            ClinicService::Grooming => "Grooming",
            ClinicService::Deworming => "Deworming",
            ClinicService::Checkup => "Check-up",
            ClinicService::Emergency => "Emergency",
        }
    }

    /// Returns true if the raw string names a catalog service.
    pub fn is_valid(raw: &str) -> bool {
        raw.parse::<ClinicService>().is_ok()
    }
}

impl fmt::Display for ClinicService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClinicService {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ClinicService::ALL
            .into_iter()
            .find(|service| service.as_str() == needle)
            .ok_or_else(|| {
                ValidationError::invalid_format("service", format!("unknown service '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_entry_parses_back() {
        for service in ClinicService::ALL {
            assert_eq!(service.as_str().parse::<ClinicService>(), Ok(service));
        }
    }

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(" Dental_Care ".parse::<ClinicService>(), Ok(ClinicService::DentalCare));
    }

    #[test]
    fn unknown_service_is_rejected() {
        assert!(!ClinicService::is_valid("acupuncture"));
        let err = "acupuncture".parse::<ClinicService>().unwrap_err();
        assert_eq!(err.field(), "service");
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ClinicService::DentalCare).unwrap();
        assert_eq!(json, r#""dental_care""#);
    }
}
