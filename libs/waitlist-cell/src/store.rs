use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_models::Specialty;

use crate::error::WaitlistError;
use crate::models::WaitlistEntry;

#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Stores a new entry and assigns its insertion sequence.
    async fn insert(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, WaitlistError>;

    async fn update(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, WaitlistError>;

    async fn get(&self, id: Uuid) -> Result<Option<WaitlistEntry>, WaitlistError>;

    /// Returns whether an entry was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, WaitlistError>;

    async fn find_unserved(
        &self,
        patient_id: Uuid,
        specialty: Specialty,
    ) -> Result<Option<WaitlistEntry>, WaitlistError>;

    /// Unserved entries of one specialty, unordered.
    async fn list_unserved(&self, specialty: Specialty) -> Result<Vec<WaitlistEntry>, WaitlistError>;

    /// Unserved entries preferring one facility, unordered.
    async fn list_unserved_by_facility(&self, facility_id: Uuid) -> Result<Vec<WaitlistEntry>, WaitlistError>;

    /// Every entry of the patient, served or not, in insertion order.
    async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<WaitlistEntry>, WaitlistError>;
}

#[derive(Default)]
struct QueueState {
    entries: HashMap<Uuid, WaitlistEntry>,
    next_sequence: u64,
}

impl QueueState {
    fn collect<F>(&self, predicate: F) -> Vec<WaitlistEntry>
    where
        F: Fn(&WaitlistEntry) -> bool,
    {
        self.entries.values().filter(|e| predicate(e)).cloned().collect()
    }
}

#[derive(Default)]
pub struct InMemoryWaitlistRepository {
    state: RwLock<QueueState>,
}

impl InMemoryWaitlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WaitlistRepository for InMemoryWaitlistRepository {
    async fn insert(&self, mut entry: WaitlistEntry) -> Result<WaitlistEntry, WaitlistError> {
        let mut state = self.state.write().await;
        entry.sequence = state.next_sequence;
        state.next_sequence += 1;
        state.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update(&self, entry: WaitlistEntry) -> Result<WaitlistEntry, WaitlistError> {
        let mut state = self.state.write().await;
        let existing = state
            .entries
            .get_mut(&entry.id)
            .ok_or(WaitlistError::EntryNotFound(entry.id))?;
        *existing = entry.clone();
        Ok(entry)
    }

    async fn get(&self, id: Uuid) -> Result<Option<WaitlistEntry>, WaitlistError> {
        Ok(self.state.read().await.entries.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WaitlistError> {
        Ok(self.state.write().await.entries.remove(&id).is_some())
    }

    async fn find_unserved(
        &self,
        patient_id: Uuid,
        specialty: Specialty,
    ) -> Result<Option<WaitlistEntry>, WaitlistError> {
        Ok(self
            .state
            .read()
            .await
            .entries
            .values()
            .find(|e| !e.served && e.patient_id == patient_id && e.specialty == specialty)
            .cloned())
    }

    async fn list_unserved(&self, specialty: Specialty) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        Ok(self
            .state
            .read()
            .await
            .collect(|e| !e.served && e.specialty == specialty))
    }

    async fn list_unserved_by_facility(&self, facility_id: Uuid) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        Ok(self
            .state
            .read()
            .await
            .collect(|e| !e.served && e.preferred_facility_id == Some(facility_id)))
    }

    async fn list_by_patient(&self, patient_id: Uuid) -> Result<Vec<WaitlistEntry>, WaitlistError> {
        let mut entries = self.state.read().await.collect(|e| e.patient_id == patient_id);
        entries.sort_by_key(|e| e.sequence);
        Ok(entries)
    }
}
