// libs/appointment-cell/src/store.rs
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentError, SlotKey};

/// Persistence seam for appointments. Records are never deleted.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert(&self, appointment: Appointment) -> Result<Appointment, AppointmentError>;

    /// Replaces an existing record. Date, time and professional must not change.
    async fn update(&self, appointment: Appointment) -> Result<Appointment, AppointmentError>;

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>, AppointmentError>;

    /// Appointments at the slot that are neither cancelled nor no-show.
    async fn count_active(&self, slot: &SlotKey) -> Result<u32, AppointmentError>;

    async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, AppointmentError>;

    async fn list_by_professional_and_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError>;

    async fn list_by_facility_and_date(
        &self,
        facility_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError>;
}

#[derive(Default)]
struct LedgerState {
    appointments: HashMap<Uuid, Appointment>,
    by_slot: HashMap<SlotKey, Vec<Uuid>>,
}

impl LedgerState {
    fn matching<F>(&self, predicate: F) -> Vec<Appointment>
    where
        F: Fn(&Appointment) -> bool,
    {
        let mut found: Vec<Appointment> = self
            .appointments
            .values()
            .filter(|a| predicate(a))
            .cloned()
            .collect();
        found.sort_by(|a, b| (a.date, a.time, a.created_at).cmp(&(b.date, b.time, b.created_at)));
        found
    }
}

/// In-process booking ledger with a per-slot index for occupancy counts.
#[derive(Default)]
pub struct InMemoryAppointmentRepository {
    state: RwLock<LedgerState>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn insert(&self, appointment: Appointment) -> Result<Appointment, AppointmentError> {
        let mut state = self.state.write().await;
        if state.appointments.contains_key(&appointment.id) {
            return Err(AppointmentError::StorageError(format!(
                "Duplicate appointment ID: {}",
                appointment.id
            )));
        }
        state
            .by_slot
            .entry(appointment.slot_key())
            .or_default()
            .push(appointment.id);
        state.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn update(&self, appointment: Appointment) -> Result<Appointment, AppointmentError> {
        let mut state = self.state.write().await;
        let existing = state
            .appointments
            .get_mut(&appointment.id)
            .ok_or(AppointmentError::NotFound(appointment.id))?;
        if existing.slot_key() != appointment.slot_key() {
            return Err(AppointmentError::StorageError(
                "Appointment slot cannot be changed in place".to_string(),
            ));
        }
        *existing = appointment.clone();
        Ok(appointment)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Appointment>, AppointmentError> {
        Ok(self.state.read().await.appointments.get(&id).cloned())
    }

    async fn count_active(&self, slot: &SlotKey) -> Result<u32, AppointmentError> {
        let state = self.state.read().await;
        let count = state
            .by_slot
            .get(slot)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.appointments.get(id))
                    .filter(|a| a.status.occupies_slot())
                    .count()
            })
            .unwrap_or(0);
        Ok(count as u32)
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.state.read().await.matching(|a| a.patient_id == patient_id))
    }

    async fn list_by_professional_and_date(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self
            .state
            .read()
            .await
            .matching(|a| a.professional_id == professional_id && a.date == date))
    }

    async fn list_by_facility_and_date(
        &self,
        facility_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self
            .state
            .read()
            .await
            .matching(|a| a.facility_id == facility_id && a.date == date))
    }
}
