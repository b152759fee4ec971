// libs/appointment-cell/src/services/conflict.rs
use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::{AppointmentError, SlotKey};
use crate::store::AppointmentRepository;

/// Occupancy accounting for slots. Callers that act on the answer must hold
/// the slot lock from the consistency service.
pub struct ConflictDetectionService {
    repository: Arc<dyn AppointmentRepository>,
}

impl ConflictDetectionService {
    pub fn new(repository: Arc<dyn AppointmentRepository>) -> Self {
        Self { repository }
    }

    /// Count of non-cancelled, non-no-show appointments at the slot.
    pub async fn occupancy(&self, slot: &SlotKey) -> Result<u32, AppointmentError> {
        self.repository.count_active(slot).await
    }

    pub async fn vacancy(&self, slot: &SlotKey, capacity: u32) -> Result<u32, AppointmentError> {
        let occupancy = self.occupancy(slot).await?;
        Ok(capacity.saturating_sub(occupancy))
    }

    /// Fails with `SlotFull` once occupancy has reached `capacity`.
    pub async fn check_capacity(&self, slot: &SlotKey, capacity: u32) -> Result<u32, AppointmentError> {
        let occupancy = self.occupancy(slot).await?;
        debug!(
            "Slot {} {} for professional {}: {}/{} taken",
            slot.date, slot.time, slot.professional_id, occupancy, capacity
        );

        if occupancy >= capacity {
            warn!("Slot full for professional {} at {} {}", slot.professional_id, slot.date, slot.time);
            return Err(AppointmentError::SlotFull {
                date: slot.date,
                time: slot.time,
            });
        }

        Ok(capacity - occupancy)
    }
}
