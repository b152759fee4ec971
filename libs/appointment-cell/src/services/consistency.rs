// libs/appointment-cell/src/services/consistency.rs
//
// Serializes every read-check-write sequence on the booking ledger. Bookings
// for one slot run one at a time, and so do transitions of one appointment.
// Different keys proceed in parallel.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use shared_utils::KeyedLocks;

use crate::models::{Appointment, AppointmentError, SlotKey};
use crate::services::conflict::ConflictDetectionService;
use crate::store::AppointmentRepository;

pub struct SchedulingConsistencyService {
    repository: Arc<dyn AppointmentRepository>,
    conflict_service: Arc<ConflictDetectionService>,
    slot_locks: KeyedLocks<SlotKey>,
    appointment_locks: KeyedLocks<Uuid>,
}

impl SchedulingConsistencyService {
    pub fn new(
        repository: Arc<dyn AppointmentRepository>,
        conflict_service: Arc<ConflictDetectionService>,
    ) -> Self {
        Self {
            repository,
            conflict_service,
            slot_locks: KeyedLocks::new("slot"),
            appointment_locks: KeyedLocks::new("appointment"),
        }
    }

    /// Insert `appointment` only if its slot still has room under `capacity`.
    /// The occupancy check and the insert happen under the slot lock.
    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id, date = %appointment.date, time = %appointment.time))]
    pub async fn atomic_appointment_booking(
        &self,
        appointment: Appointment,
        capacity: u32,
    ) -> Result<Appointment, AppointmentError> {
        let slot = appointment.slot_key();
        let _guard = self.slot_locks.lock(slot).await;

        let vacancy = self.conflict_service.check_capacity(&slot, capacity).await?;
        let appointment = self.repository.insert(appointment).await?;

        info!(
            "Appointment {} booked for professional {} ({} vacancies left)",
            appointment.id,
            slot.professional_id,
            vacancy - 1
        );
        Ok(appointment)
    }

    /// Load, guard and persist one appointment while holding its lock.
    pub async fn atomic_transition<F>(&self, id: Uuid, transition: F) -> Result<Appointment, AppointmentError>
    where
        F: FnOnce(&mut Appointment) -> Result<(), AppointmentError> + Send,
    {
        let _guard = self.appointment_locks.lock(id).await;

        let mut appointment = self
            .repository
            .get(id)
            .await?
            .ok_or(AppointmentError::NotFound(id))?;

        let previous = appointment.status;
        transition(&mut appointment)?;
        appointment.updated_at = Utc::now();

        let appointment = self.repository.update(appointment).await?;
        debug!("Appointment {} moved from {} to {}", id, previous, appointment.status);
        Ok(appointment)
    }

    pub fn locked_slots(&self) -> usize {
        self.slot_locks.active_keys()
    }
}
