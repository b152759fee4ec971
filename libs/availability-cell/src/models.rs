use chrono::{DateTime, Duration, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use directory_cell::DirectoryError;
use shared_models::error::AppError;

use crate::services::slots::SlotTimes;

pub const DEFAULT_SLOT_DURATION_MINUTES: u32 = 30;
pub const MIN_SLOT_DURATION_MINUTES: u32 = 10;
pub const MAX_SLOT_DURATION_MINUTES: u32 = 120;
pub const DEFAULT_CAPACITY_PER_SLOT: u32 = 1;
pub const MIN_CAPACITY_PER_SLOT: u32 = 1;
pub const MAX_CAPACITY_PER_SLOT: u32 = 10;

/// Recurring weekly window in which a professional sees patients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityTemplate {
    pub id: Uuid,
    pub professional_id: Uuid,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: u32,
    pub capacity_per_slot: u32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AvailabilityTemplate {
    /// Half-open membership: `start <= time < end`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start_time && time < self.end_time
    }

    pub fn slot_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.slot_duration_minutes))
    }

    /// Slot start times `start, start + d, ...` strictly before `end`.
    pub fn slot_times(&self) -> SlotTimes {
        SlotTimes::new(self.start_time, self.end_time, self.slot_duration())
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRequest {
    pub professional_id: Uuid,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: Option<u32>,
    pub capacity_per_slot: Option<u32>,
}

impl TemplateRequest {
    pub fn slot_duration_minutes(&self) -> u32 {
        self.slot_duration_minutes.unwrap_or(DEFAULT_SLOT_DURATION_MINUTES)
    }

    pub fn capacity_per_slot(&self) -> u32 {
        self.capacity_per_slot.unwrap_or(DEFAULT_CAPACITY_PER_SLOT)
    }

    pub fn validate(&self) -> Result<(), AvailabilityError> {
        if self.end_time <= self.start_time {
            return Err(AvailabilityError::InvalidRange {
                start: self.start_time,
                end: self.end_time,
            });
        }

        let duration = self.slot_duration_minutes();
        if !(MIN_SLOT_DURATION_MINUTES..=MAX_SLOT_DURATION_MINUTES).contains(&duration) {
            return Err(AvailabilityError::ValidationError(format!(
                "Slot duration must be between {} and {} minutes",
                MIN_SLOT_DURATION_MINUTES, MAX_SLOT_DURATION_MINUTES
            )));
        }

        let capacity = self.capacity_per_slot();
        if !(MIN_CAPACITY_PER_SLOT..=MAX_CAPACITY_PER_SLOT).contains(&capacity) {
            return Err(AvailabilityError::ValidationError(format!(
                "Capacity per slot must be between {} and {}",
                MIN_CAPACITY_PER_SLOT, MAX_CAPACITY_PER_SLOT
            )));
        }

        Ok(())
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Availability template not found: {0}")]
    NotFound(Uuid),

    #[error("End time {end} must be after start time {start}")]
    InvalidRange { start: NaiveTime, end: NaiveTime },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<AvailabilityError> for AppError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::NotFound(_) => AppError::NotFound(err.to_string()),
            AvailabilityError::InvalidRange { .. } => AppError::BadRequest(err.to_string()),
            AvailabilityError::ValidationError(msg) => AppError::ValidationError(msg),
            AvailabilityError::Directory(inner) => inner.into(),
            AvailabilityError::StorageError(msg) => AppError::Internal(msg),
        }
    }
}
