#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Weekday};
use uuid::Uuid;

use appointment_cell::{
    Appointment, AppointmentBookingService, AppointmentError, AppointmentLifecycleService,
    AppointmentRepository, AppointmentState, ConflictDetectionService, Directories,
    InMemoryAppointmentRepository, SchedulingConsistencyService, SlotKey,
};
use availability_cell::{
    AvailabilityService, AvailabilityTemplate, InMemoryTemplateRepository, SlotCalculator,
    TemplateRequest,
};
use directory_cell::{
    Facility, InMemoryDirectory, Professional, RegisterFacilityRequest, RegisterPatientRequest,
    RegisterProfessionalRequest,
};
use shared_models::Specialty;
use shared_utils::test_utils::TestConfig;

pub struct TestClinic {
    pub directory: Arc<InMemoryDirectory>,
    pub availability: Arc<AvailabilityService>,
    pub booking: Arc<AppointmentBookingService>,
    pub lifecycle: Arc<AppointmentLifecycleService>,
    pub consistency: Arc<SchedulingConsistencyService>,
    pub facility: Facility,
}

impl TestClinic {
    pub async fn new() -> Self {
        Self::with_repository(Arc::new(InMemoryAppointmentRepository::new())).await
    }

    pub async fn with_repository(repository: Arc<dyn AppointmentRepository>) -> Self {
        let config = Arc::new(TestConfig::default().to_app_config());
        let directory = Arc::new(InMemoryDirectory::new());
        let availability = Arc::new(AvailabilityService::new(
            Arc::new(InMemoryTemplateRepository::new()),
            directory.clone(),
        ));
        let calculator = Arc::new(SlotCalculator::new(availability.clone()));

        let conflicts = Arc::new(ConflictDetectionService::new(repository.clone()));
        let consistency = Arc::new(SchedulingConsistencyService::new(
            repository.clone(),
            conflicts.clone(),
        ));
        let booking = Arc::new(AppointmentBookingService::new(
            config,
            Directories::from_single(directory.clone()),
            calculator,
            repository,
            conflicts,
            consistency.clone(),
        ));
        let lifecycle = Arc::new(AppointmentLifecycleService::new(consistency.clone()));

        let facility = directory
            .register_facility(RegisterFacilityRequest {
                name: "UBS Vila Nova".to_string(),
                address: "Av. Brasil, 1500".to_string(),
            })
            .await
            .unwrap();

        Self {
            directory,
            availability,
            booking,
            lifecycle,
            consistency,
            facility,
        }
    }

    pub fn state(&self) -> AppointmentState {
        AppointmentState {
            booking: self.booking.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }

    pub async fn professional(&self, name: &str, specialty: Specialty) -> Professional {
        self.directory
            .register_professional(RegisterProfessionalRequest {
                name: name.to_string(),
                specialty,
                facility_id: self.facility.id,
            })
            .await
            .unwrap()
    }

    pub async fn patient(&self, name: &str) -> Uuid {
        self.directory
            .register_patient(RegisterPatientRequest {
                name: name.to_string(),
                date_of_birth: chrono::NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
                priority: None,
            })
            .await
            .unwrap()
            .id
    }

    pub async fn template(
        &self,
        professional_id: Uuid,
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
        duration: u32,
        capacity: u32,
    ) -> AvailabilityTemplate {
        self.availability
            .create_template(TemplateRequest {
                professional_id,
                weekday,
                start_time: start,
                end_time: end,
                slot_duration_minutes: Some(duration),
                capacity_per_slot: Some(capacity),
            })
            .await
            .unwrap()
    }
}

/// Ledger that sleeps inside `count_active`, so concurrent bookings interleave
/// between the occupancy read and the insert unless the slot is locked.
pub struct YieldingLedger {
    inner: InMemoryAppointmentRepository,
    pause: std::time::Duration,
}

impl YieldingLedger {
    pub fn new(pause: std::time::Duration) -> Self {
        Self {
            inner: InMemoryAppointmentRepository::new(),
            pause,
        }
    }
}

#[async_trait]
impl AppointmentRepository for YieldingLedger {
    async fn insert(&self, appointment: Appointment) -> Result<Appointment, AppointmentError> {
        self.inner.insert(appointment).await
    }

    async fn update(&self, appointment: Appointment) -> Result<Appointment, AppointmentError> {
        self.inner.update(appointment).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>, AppointmentError> {
        self.inner.get(id).await
    }

    async fn count_active(&self, slot: &SlotKey) -> Result<u32, AppointmentError> {
        let count = self.inner.count_active(slot).await?;
        tokio::time::sleep(self.pause).await;
        Ok(count)
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, AppointmentError> {
        self.inner.list_by_patient(patient_id).await
    }

    async fn list_by_professional_and_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.inner.list_by_professional_and_date(professional_id, date).await
    }

    async fn list_by_facility_and_date(
        &self,
        facility_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.inner.list_by_facility_and_date(facility_id, date).await
    }
}
