use async_trait::async_trait;
use uuid::Uuid;

use shared_models::Specialty;

use crate::models::{DirectoryError, Facility, Patient, Professional};

/// Lookups fail with a not-found error for missing or inactive patients.
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    async fn get_patient(&self, id: Uuid) -> Result<Patient, DirectoryError>;
}

/// Lookups fail with a not-found error for missing or inactive professionals.
#[async_trait]
pub trait ProfessionalDirectory: Send + Sync {
    async fn get_professional(&self, id: Uuid) -> Result<Professional, DirectoryError>;

    /// Active professionals of one specialty, in a stable order.
    async fn list_by_specialty(&self, specialty: Specialty) -> Result<Vec<Professional>, DirectoryError>;
}

#[async_trait]
pub trait FacilityDirectory: Send + Sync {
    async fn get_facility(&self, id: Uuid) -> Result<Facility, DirectoryError>;
}
