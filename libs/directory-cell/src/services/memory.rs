use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::{Priority, Specialty};

use crate::models::{
    DirectoryError, Facility, Patient, Professional, RegisterFacilityRequest,
    RegisterPatientRequest, RegisterProfessionalRequest, UpdateProfessionalRequest,
};
use crate::services::directory::{FacilityDirectory, PatientDirectory, ProfessionalDirectory};

#[derive(Default)]
struct DirectoryState {
    facilities: HashMap<Uuid, Facility>,
    professionals: HashMap<Uuid, Professional>,
    patients: HashMap<Uuid, Patient>,
}

/// Process-local registry of patients, professionals and facilities.
#[derive(Default)]
pub struct InMemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register_facility(&self, request: RegisterFacilityRequest) -> Result<Facility, DirectoryError> {
        require_text("name", &request.name)?;
        require_text("address", &request.address)?;

        let facility = Facility {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            address: request.address.trim().to_string(),
            active: true,
            created_at: Utc::now(),
        };

        self.state.write().await.facilities.insert(facility.id, facility.clone());
        info!("Facility registered with ID: {}", facility.id);
        Ok(facility)
    }

    pub async fn register_professional(
        &self,
        request: RegisterProfessionalRequest,
    ) -> Result<Professional, DirectoryError> {
        require_text("name", &request.name)?;

        let mut state = self.state.write().await;
        active_facility(&state, request.facility_id)?;

        let now = Utc::now();
        let professional = Professional {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            specialty: request.specialty,
            facility_id: request.facility_id,
            active: true,
            created_at: now,
            updated_at: now,
        };

        state.professionals.insert(professional.id, professional.clone());
        info!("Professional registered with ID: {} ({})", professional.id, professional.specialty);
        Ok(professional)
    }

    pub async fn update_professional(
        &self,
        id: Uuid,
        request: UpdateProfessionalRequest,
    ) -> Result<Professional, DirectoryError> {
        let mut state = self.state.write().await;

        if let Some(facility_id) = request.facility_id {
            active_facility(&state, facility_id)?;
        }

        let professional = state
            .professionals
            .get_mut(&id)
            .ok_or(DirectoryError::ProfessionalNotFound(id))?;

        if let Some(name) = request.name {
            require_text("name", &name)?;
            professional.name = name.trim().to_string();
        }
        if let Some(specialty) = request.specialty {
            professional.specialty = specialty;
        }
        if let Some(facility_id) = request.facility_id {
            professional.facility_id = facility_id;
        }
        professional.updated_at = Utc::now();

        debug!("Professional {} updated", id);
        Ok(professional.clone())
    }

    pub async fn register_patient(&self, request: RegisterPatientRequest) -> Result<Patient, DirectoryError> {
        require_text("name", &request.name)?;

        let now = Utc::now();
        let today = now.date_naive();
        if request.date_of_birth > today {
            return Err(DirectoryError::ValidationError(
                "Date of birth must be in the past".to_string(),
            ));
        }

        let priority = match request.priority {
            Some(explicit) => explicit,
            None => Priority::for_age(crate::models::age_on(request.date_of_birth, today)),
        };

        let patient = Patient {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            date_of_birth: request.date_of_birth,
            priority,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.state.write().await.patients.insert(patient.id, patient.clone());
        info!("Patient registered with ID: {} (priority {:?})", patient.id, patient.priority);
        Ok(patient)
    }

    pub async fn set_patient_priority(&self, id: Uuid, priority: Priority) -> Result<Patient, DirectoryError> {
        let mut state = self.state.write().await;
        let patient = state.patients.get_mut(&id).ok_or(DirectoryError::PatientNotFound(id))?;
        patient.priority = priority;
        patient.updated_at = Utc::now();
        Ok(patient.clone())
    }

    pub async fn deactivate_patient(&self, id: Uuid) -> Result<(), DirectoryError> {
        let mut state = self.state.write().await;
        let patient = state.patients.get_mut(&id).ok_or(DirectoryError::PatientNotFound(id))?;
        patient.active = false;
        patient.updated_at = Utc::now();
        info!("Patient {} deactivated", id);
        Ok(())
    }

    pub async fn deactivate_professional(&self, id: Uuid) -> Result<(), DirectoryError> {
        let mut state = self.state.write().await;
        let professional = state
            .professionals
            .get_mut(&id)
            .ok_or(DirectoryError::ProfessionalNotFound(id))?;
        professional.active = false;
        professional.updated_at = Utc::now();
        info!("Professional {} deactivated", id);
        Ok(())
    }
}

#[async_trait]
impl PatientDirectory for InMemoryDirectory {
    async fn get_patient(&self, id: Uuid) -> Result<Patient, DirectoryError> {
        self.state
            .read()
            .await
            .patients
            .get(&id)
            .filter(|p| p.active)
            .cloned()
            .ok_or(DirectoryError::PatientNotFound(id))
    }
}

#[async_trait]
impl ProfessionalDirectory for InMemoryDirectory {
    async fn get_professional(&self, id: Uuid) -> Result<Professional, DirectoryError> {
        self.state
            .read()
            .await
            .professionals
            .get(&id)
            .filter(|p| p.active)
            .cloned()
            .ok_or(DirectoryError::ProfessionalNotFound(id))
    }

    async fn list_by_specialty(&self, specialty: Specialty) -> Result<Vec<Professional>, DirectoryError> {
        let state = self.state.read().await;
        let mut professionals: Vec<Professional> = state
            .professionals
            .values()
            .filter(|p| p.active && p.specialty == specialty)
            .cloned()
            .collect();

        professionals.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(professionals)
    }
}

#[async_trait]
impl FacilityDirectory for InMemoryDirectory {
    async fn get_facility(&self, id: Uuid) -> Result<Facility, DirectoryError> {
        self.state
            .read()
            .await
            .facilities
            .get(&id)
            .filter(|f| f.active)
            .cloned()
            .ok_or(DirectoryError::FacilityNotFound(id))
    }
}

fn active_facility(state: &DirectoryState, id: Uuid) -> Result<&Facility, DirectoryError> {
    state
        .facilities
        .get(&id)
        .filter(|f| f.active)
        .ok_or(DirectoryError::FacilityNotFound(id))
}

fn require_text(field: &str, value: &str) -> Result<(), DirectoryError> {
    if value.trim().is_empty() {
        return Err(DirectoryError::ValidationError(format!("{} is required", field)));
    }
    Ok(())
}
