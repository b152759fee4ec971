use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use directory_cell::{FacilityDirectory, PatientDirectory};
use shared_models::Specialty;
use shared_utils::KeyedLocks;

use crate::error::WaitlistError;
use crate::models::{JoinWaitlistRequest, WaitlistEntry, WaitlistPosition};
use crate::store::WaitlistRepository;

/// Priority-ordered waitlist per specialty.
pub struct WaitlistService {
    repository: Arc<dyn WaitlistRepository>,
    patients: Arc<dyn PatientDirectory>,
    facilities: Arc<dyn FacilityDirectory>,
    join_locks: KeyedLocks<(Uuid, Specialty)>,
    entry_locks: KeyedLocks<Uuid>,
}

impl WaitlistService {
    pub fn new(
        repository: Arc<dyn WaitlistRepository>,
        patients: Arc<dyn PatientDirectory>,
        facilities: Arc<dyn FacilityDirectory>,
    ) -> Self {
        Self {
            repository,
            patients,
            facilities,
            join_locks: KeyedLocks::new("waitlist_join"),
            entry_locks: KeyedLocks::new("waitlist_entry"),
        }
    }

    /// Add a patient to a specialty's queue with the patient's current priority.
    pub async fn join(&self, request: JoinWaitlistRequest) -> Result<WaitlistPosition, WaitlistError> {
        info!("Patient {} joining waitlist for {}", request.patient_id, request.specialty);

        request.validate()?;
        let patient = self.patients.get_patient(request.patient_id).await?;
        if let Some(facility_id) = request.preferred_facility_id {
            self.facilities.get_facility(facility_id).await?;
        }

        let entry = {
            let _guard = self.join_locks.lock((patient.id, request.specialty)).await;

            if self
                .repository
                .find_unserved(patient.id, request.specialty)
                .await?
                .is_some()
            {
                warn!("Patient {} already queued for {}", patient.id, request.specialty);
                return Err(WaitlistError::AlreadyQueued {
                    patient_id: patient.id,
                    specialty: request.specialty,
                });
            }

            self.repository
                .insert(WaitlistEntry {
                    id: Uuid::new_v4(),
                    patient_id: patient.id,
                    specialty: request.specialty,
                    preferred_facility_id: request.preferred_facility_id,
                    priority: patient.priority,
                    requested_at: Utc::now(),
                    served: false,
                    served_at: None,
                    notes: request.notes.filter(|n| !n.trim().is_empty()),
                    sequence: 0,
                })
                .await?
        };

        let position = self.with_position(entry).await?;
        info!(
            "Waitlist entry {} created at position {}/{}",
            position.entry.id, position.position, position.total_in_queue
        );
        Ok(position)
    }

    /// Unserved entries of a specialty in canonical queue order.
    pub async fn ordered(&self, specialty: Specialty) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        let mut entries = self.repository.list_unserved(specialty).await?;
        entries.sort_by(WaitlistEntry::queue_order);
        Ok(entries)
    }

    /// Unserved entries preferring a facility, in canonical queue order.
    pub async fn ordered_by_facility(&self, facility_id: Uuid) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        let mut entries = self.repository.list_unserved_by_facility(facility_id).await?;
        entries.sort_by(WaitlistEntry::queue_order);
        Ok(entries)
    }

    /// 1-based rank in the specialty queue; 0 when served, removed or unknown.
    pub async fn position_of(&self, entry_id: Uuid) -> Result<usize, WaitlistError> {
        match self.repository.get(entry_id).await? {
            Some(entry) if !entry.served => {
                let ordered = self.ordered(entry.specialty).await?;
                Ok(rank_in(&ordered, entry_id))
            }
            _ => Ok(0),
        }
    }

    pub async fn count(&self, specialty: Specialty) -> Result<usize, WaitlistError> {
        Ok(self.repository.list_unserved(specialty).await?.len())
    }

    pub async fn get(&self, entry_id: Uuid) -> Result<WaitlistPosition, WaitlistError> {
        let entry = self
            .repository
            .get(entry_id)
            .await?
            .ok_or(WaitlistError::EntryNotFound(entry_id))?;
        self.with_position(entry).await
    }

    pub async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<WaitlistPosition>, WaitlistError> {
        let entries = self.repository.list_by_patient(patient_id).await?;
        let mut positions = Vec::with_capacity(entries.len());
        for entry in entries {
            positions.push(self.with_position(entry).await?);
        }
        Ok(positions)
    }

    /// Take an entry off the queue for good.
    pub async fn mark_served(&self, entry_id: Uuid) -> Result<WaitlistEntry, WaitlistError> {
        let _guard = self.entry_locks.lock(entry_id).await;

        let mut entry = self
            .repository
            .get(entry_id)
            .await?
            .ok_or(WaitlistError::EntryNotFound(entry_id))?;
        if entry.served {
            return Err(WaitlistError::AlreadyServed(entry_id));
        }

        entry.served = true;
        entry.served_at = Some(Utc::now());
        let entry = self.repository.update(entry).await?;
        info!("Waitlist entry {} served", entry_id);
        Ok(entry)
    }

    /// Delete an entry whether or not it was served.
    pub async fn remove(&self, entry_id: Uuid) -> Result<(), WaitlistError> {
        let _guard = self.entry_locks.lock(entry_id).await;

        if !self.repository.delete(entry_id).await? {
            return Err(WaitlistError::EntryNotFound(entry_id));
        }
        info!("Waitlist entry {} removed", entry_id);
        Ok(())
    }

    async fn with_position(&self, entry: WaitlistEntry) -> Result<WaitlistPosition, WaitlistError> {
        let ordered = self.ordered(entry.specialty).await?;
        let position = if entry.served { 0 } else { rank_in(&ordered, entry.id) };
        debug!("Entry {} at position {} of {}", entry.id, position, ordered.len());

        Ok(WaitlistPosition {
            total_in_queue: ordered.len(),
            position,
            entry,
        })
    }
}

fn rank_in(ordered: &[WaitlistEntry], entry_id: Uuid) -> usize {
    ordered
        .iter()
        .position(|e| e.id == entry_id)
        .map(|index| index + 1)
        .unwrap_or(0)
}
