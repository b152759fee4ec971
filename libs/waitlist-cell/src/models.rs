use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::{Priority, Specialty};

use crate::error::WaitlistError;

pub const MAX_NOTES_LENGTH: usize = 500;

/// A patient waiting for a specialty that had no open slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub specialty: Specialty,
    pub preferred_facility_id: Option<Uuid>,
    /// Copied from the patient on join; later patient changes do not move the entry.
    pub priority: Priority,
    pub requested_at: DateTime<Utc>,
    pub served: bool,
    pub served_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    /// Insertion order, assigned by the repository.
    pub sequence: u64,
}

impl WaitlistEntry {
    /// Canonical queue order: heavier priority first, then earlier request,
    /// then earlier insertion.
    pub fn queue_order(a: &WaitlistEntry, b: &WaitlistEntry) -> Ordering {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| a.requested_at.cmp(&b.requested_at))
            .then_with(|| a.sequence.cmp(&b.sequence))
    }
}

/// An entry with its 1-based rank (0 once served) and the queue length.
#[derive(Debug, Clone, Serialize)]
pub struct WaitlistPosition {
    #[serde(flatten)]
    pub entry: WaitlistEntry,
    pub position: usize,
    pub total_in_queue: usize,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinWaitlistRequest {
    pub patient_id: Uuid,
    pub specialty: Specialty,
    pub preferred_facility_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl JoinWaitlistRequest {
    pub fn validate(&self) -> Result<(), WaitlistError> {
        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_NOTES_LENGTH {
                return Err(WaitlistError::ValidationError(format!(
                    "Notes must be at most {} characters",
                    MAX_NOTES_LENGTH
                )));
            }
        }
        Ok(())
    }
}
