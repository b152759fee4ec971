// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use availability_cell::SlotCalculator;
use directory_cell::{
    DirectoryError, FacilityDirectory, PatientDirectory, Professional, ProfessionalDirectory,
};
use shared_config::AppConfig;
use shared_models::Specialty;

use crate::models::{
    Appointment, AppointmentDetails, AppointmentError, AppointmentStatus, BookAppointmentRequest,
    OpenSlot, SlotKey,
};
use crate::services::conflict::ConflictDetectionService;
use crate::services::consistency::SchedulingConsistencyService;
use crate::store::AppointmentRepository;

/// Directory lookups the engine needs, bundled so they can come from one
/// implementation or from several.
#[derive(Clone)]
pub struct Directories {
    pub patients: Arc<dyn PatientDirectory>,
    pub professionals: Arc<dyn ProfessionalDirectory>,
    pub facilities: Arc<dyn FacilityDirectory>,
}

impl Directories {
    pub fn from_single<D>(directory: Arc<D>) -> Self
    where
        D: PatientDirectory + ProfessionalDirectory + FacilityDirectory + 'static,
    {
        Self {
            patients: directory.clone(),
            professionals: directory.clone(),
            facilities: directory,
        }
    }
}

pub struct AppointmentBookingService {
    config: Arc<AppConfig>,
    directories: Directories,
    calculator: Arc<SlotCalculator>,
    repository: Arc<dyn AppointmentRepository>,
    conflict_service: Arc<ConflictDetectionService>,
    consistency_service: Arc<SchedulingConsistencyService>,
}

impl AppointmentBookingService {
    pub fn new(
        config: Arc<AppConfig>,
        directories: Directories,
        calculator: Arc<SlotCalculator>,
        repository: Arc<dyn AppointmentRepository>,
        conflict_service: Arc<ConflictDetectionService>,
        consistency_service: Arc<SchedulingConsistencyService>,
    ) -> Self {
        Self {
            config,
            directories,
            calculator,
            repository,
            conflict_service,
            consistency_service,
        }
    }

    /// Book a patient into a professional's slot, capturing the professional's
    /// current facility on the appointment.
    pub async fn book(&self, request: BookAppointmentRequest) -> Result<Appointment, AppointmentError> {
        info!(
            "Booking appointment for patient {} with professional {} at {} {}",
            request.patient_id, request.professional_id, request.date, request.time
        );

        request.validate()?;
        self.directories.patients.get_patient(request.patient_id).await?;
        let professional = self
            .directories
            .professionals
            .get_professional(request.professional_id)
            .await?;

        let schedule = self
            .calculator
            .day_schedule(professional.id, request.date)
            .await?;
        if schedule.is_empty() {
            warn!("No availability for professional {} on {}", professional.id, request.date);
            return Err(AppointmentError::NoAvailabilityConfigured {
                professional_id: professional.id,
                date: request.date,
            });
        }

        let template = schedule
            .template_at(request.time)
            .ok_or(AppointmentError::SlotOutsideWindow { time: request.time })?;
        let capacity = template.capacity_per_slot;

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            professional_id: professional.id,
            facility_id: professional.facility_id,
            date: request.date,
            time: request.time,
            appointment_type: request.appointment_type,
            status: AppointmentStatus::Scheduled,
            notes: request.notes.filter(|n| !n.trim().is_empty()),
            cancellation_reason: None,
            confirmed_at: None,
            arrived_at: None,
            started_at: None,
            ended_at: None,
            created_at: now,
            updated_at: now,
        };

        self.consistency_service
            .atomic_appointment_booking(appointment, capacity)
            .await
    }

    /// Every slot with vacancy for active professionals of `specialty`
    /// between `date_from` and `date_to` inclusive.
    pub async fn list_open_slots(
        &self,
        specialty: Specialty,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<OpenSlot>, AppointmentError> {
        info!("Searching open {} slots between {} and {}", specialty, date_from, date_to);

        if date_from > date_to {
            return Ok(Vec::new());
        }
        let days = (date_to - date_from).num_days() + 1;
        if days > self.config.max_slot_search_days {
            return Err(AppointmentError::ValidationError(format!(
                "Date range must span at most {} days",
                self.config.max_slot_search_days
            )));
        }

        let professionals = self.directories.professionals.list_by_specialty(specialty).await?;
        let mut slots = Vec::new();

        for professional in &professionals {
            let facility = match self.directories.facilities.get_facility(professional.facility_id).await {
                Ok(facility) => facility,
                Err(DirectoryError::FacilityNotFound(id)) => {
                    warn!("Skipping professional {}: facility {} unavailable", professional.id, id);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            for date in date_from.iter_days().take_while(|d| *d <= date_to) {
                self.collect_open_slots(professional, &facility, date, &mut slots).await?;
            }
        }

        debug!("Found {} open slots for {}", slots.len(), specialty);
        Ok(slots)
    }

    async fn collect_open_slots(
        &self,
        professional: &Professional,
        facility: &directory_cell::Facility,
        date: NaiveDate,
        slots: &mut Vec<OpenSlot>,
    ) -> Result<(), AppointmentError> {
        let schedule = self.calculator.day_schedule(professional.id, date).await?;

        for candidate in schedule.slots() {
            let key = SlotKey {
                professional_id: professional.id,
                date,
                time: candidate.time,
            };
            let vacancy = self.conflict_service.vacancy(&key, candidate.capacity()).await?;
            if vacancy == 0 {
                continue;
            }

            slots.push(OpenSlot {
                professional_id: professional.id,
                professional_name: professional.name.clone(),
                specialty: professional.specialty,
                facility_id: facility.id,
                facility_name: facility.name.clone(),
                facility_address: facility.address.clone(),
                date,
                time: candidate.time,
                vacancy,
            });
        }
        Ok(())
    }

    // ==========================================================================
    // LEDGER QUERIES
    // ==========================================================================

    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        self.repository
            .get(id)
            .await?
            .ok_or(AppointmentError::NotFound(id))
    }

    /// Appointment with the booked facility's name and address. The facility
    /// fields are empty when it has since been deactivated.
    pub async fn get_appointment_details(&self, id: Uuid) -> Result<AppointmentDetails, AppointmentError> {
        let appointment = self.get_appointment(id).await?;
        let facility = match self.directories.facilities.get_facility(appointment.facility_id).await {
            Ok(facility) => Some(facility),
            Err(DirectoryError::FacilityNotFound(_)) => None,
            Err(e) => return Err(e.into()),
        };

        Ok(AppointmentDetails {
            facility_name: facility.as_ref().map(|f| f.name.clone()),
            facility_address: facility.map(|f| f.address),
            appointment,
        })
    }

    /// Oldest first.
    pub async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, AppointmentError> {
        self.repository.list_by_patient(patient_id).await
    }

    /// Most recent first.
    pub async fn patient_history(&self, patient_id: Uuid) -> Result<Vec<Appointment>, AppointmentError> {
        let mut history = self.repository.list_by_patient(patient_id).await?;
        history.sort_by(|a, b| (b.date, b.time).cmp(&(a.date, a.time)));
        Ok(history)
    }

    pub async fn list_by_professional_and_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.repository
            .list_by_professional_and_date(professional_id, date)
            .await
    }

    pub async fn list_by_facility_and_date(
        &self,
        facility_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.repository.list_by_facility_and_date(facility_id, date).await
    }
}
