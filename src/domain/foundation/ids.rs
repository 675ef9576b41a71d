//! Strongly-typed identifier value objects.
//!
//! Clinic records are keyed by positive integers. Each identifier wraps the
//! raw integer and validates it on construction so a `PetId` can never be
//! confused with a `VeterinarianId` or hold a non-positive value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Unique identifier for an appointment.
///
/// The nil value (`0`) marks an aggregate that has not been persisted yet;
/// the repository assigns a real id on first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct AppointmentId(i64);

impl AppointmentId {
    /// Id of an appointment that has not been created yet.
    pub const NIL: AppointmentId = AppointmentId(0);

    /// Creates an AppointmentId, returning error if not positive.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        if raw <= 0 {
            return Err(ValidationError::non_positive("appointment_id", raw));
        }
        Ok(Self(raw))
    }

    /// Returns true if this is the nil id.
    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }

    /// Returns the raw integer value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Default for AppointmentId {
    fn default() -> Self {
        Self::NIL
    }
}

/// Stored records may carry the nil id; negative values are rejected.
impl TryFrom<i64> for AppointmentId {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw == 0 {
            return Ok(Self::NIL);
        }
        Self::new(raw)
    }
}

impl From<AppointmentId> for i64 {
    fn from(id: AppointmentId) -> Self {
        id.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AppointmentId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_raw("appointment_id", s)?)
    }
}

/// Identifier of the pet an appointment is booked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PetId(i64);

impl PetId {
    /// Creates a PetId, returning error if not positive.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        if raw <= 0 {
            return Err(ValidationError::non_positive("pet_id", raw));
        }
        Ok(Self(raw))
    }

    /// Returns the raw integer value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for PetId {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PetId> for i64 {
    fn from(id: PetId) -> Self {
        id.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PetId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_raw("pet_id", s)?)
    }
}

/// Identifier of the veterinarian attending an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct VeterinarianId(i64);

impl VeterinarianId {
    /// Creates a VeterinarianId, returning error if not positive.
    pub fn new(raw: i64) -> Result<Self, ValidationError> {
        if raw <= 0 {
            return Err(ValidationError::non_positive("vet_id", raw));
        }
        Ok(Self(raw))
    }

    /// Returns the raw integer value.
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for VeterinarianId {
    type Error = ValidationError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<VeterinarianId> for i64 {
    fn from(id: VeterinarianId) -> Self {
        id.0
    }
}

impl fmt::Display for VeterinarianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VeterinarianId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_raw("vet_id", s)?)
    }
}

/// User identifier (typically from auth provider).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_raw(field: &str, s: &str) -> Result<i64, ValidationError> {
    s.trim()
        .parse::<i64>()
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_id_nil_is_default() {
        assert!(AppointmentId::default().is_nil());
        assert_eq!(AppointmentId::default(), AppointmentId::NIL);
    }

    #[test]
    fn appointment_id_rejects_zero_and_negative() {
        assert!(AppointmentId::new(0).is_err());
        assert!(AppointmentId::new(-7).is_err());
    }

    #[test]
    fn appointment_id_accepts_positive() {
        let id = AppointmentId::new(42).unwrap();
        assert!(!id.is_nil());
        assert_eq!(id.value(), 42);
    }

    #[test]
    fn pet_id_rejects_non_positive() {
        let err = PetId::new(0).unwrap_err();
        assert_eq!(format!("{}", err), "Field 'pet_id' must be positive, got 0");
    }

    #[test]
    fn vet_id_rejects_non_positive() {
        assert!(VeterinarianId::new(-1).is_err());
        assert_eq!(VeterinarianId::new(3).unwrap().value(), 3);
    }

    #[test]
    fn ids_compare_by_value() {
        assert_eq!(PetId::new(5).unwrap(), PetId::new(5).unwrap());
        assert_ne!(PetId::new(5).unwrap(), PetId::new(6).unwrap());
    }

    #[test]
    fn pet_id_parses_from_string() {
        let id: PetId = " 17 ".parse().unwrap();
        assert_eq!(id.value(), 17);
    }

    #[test]
    fn vet_id_parse_rejects_garbage() {
        let result = "abc".parse::<VeterinarianId>();
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn appointment_id_parse_rejects_nil() {
        assert!("0".parse::<AppointmentId>().is_err());
    }

    #[test]
    fn ids_serialize_as_plain_integers() {
        let json = serde_json::to_string(&VeterinarianId::new(9).unwrap()).unwrap();
        assert_eq!(json, "9");

        let id: AppointmentId = serde_json::from_str("12").unwrap();
        assert_eq!(id.value(), 12);
    }

    #[test]
    fn deserialization_rejects_non_positive_ids() {
        assert!(serde_json::from_str::<PetId>("0").is_err());
        assert!(serde_json::from_str::<VeterinarianId>("-3").is_err());
        assert!(serde_json::from_str::<AppointmentId>("-1").is_err());
    }

    #[test]
    fn appointment_id_deserializes_nil() {
        let id: AppointmentId = serde_json::from_str("0").unwrap();
        assert!(id.is_nil());
        assert_eq!(serde_json::to_string(&id).unwrap(), "0");
    }

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("vet-desk-1").unwrap();
        assert_eq!(id.as_str(), "vet-desk-1");
    }

    #[test]
    fn user_id_rejects_blank_string() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }
}
