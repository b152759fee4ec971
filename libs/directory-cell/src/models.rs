use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::{Priority, Specialty};

// ==============================================================================
// DIRECTORY RECORDS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub id: Uuid,
    pub name: String,
    pub specialty: Specialty,
    pub facility_id: Uuid,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub priority: Priority,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub fn age_on(&self, date: NaiveDate) -> u32 {
        age_on(self.date_of_birth, date)
    }
}

/// Whole years elapsed between `birth` and `date`; zero for future birth dates.
pub fn age_on(birth: NaiveDate, date: NaiveDate) -> u32 {
    if date <= birth {
        return 0;
    }
    let mut years = date.year() - birth.year();
    if (date.month(), date.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterFacilityRequest {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterProfessionalRequest {
    pub name: String,
    pub specialty: Specialty,
    pub facility_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfessionalRequest {
    pub name: Option<String>,
    pub specialty: Option<Specialty>,
    pub facility_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub name: String,
    pub date_of_birth: NaiveDate,
    /// When absent the priority is derived from the patient's age.
    pub priority: Option<Priority>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    #[error("Patient not found: {0}")]
    PatientNotFound(Uuid),

    #[error("Professional not found: {0}")]
    ProfessionalNotFound(Uuid),

    #[error("Facility not found: {0}")]
    FacilityNotFound(Uuid),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<DirectoryError> for AppError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::ValidationError(msg) => AppError::ValidationError(msg),
            other => AppError::NotFound(other.to_string()),
        }
    }
}
