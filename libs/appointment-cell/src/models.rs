// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use availability_cell::AvailabilityError;
use directory_cell::DirectoryError;
use shared_models::error::AppError;
use shared_models::Specialty;

pub const MAX_NOTES_LENGTH: usize = 500;
pub const MIN_CANCELLATION_REASON_LENGTH: usize = 10;
pub const MAX_CANCELLATION_REASON_LENGTH: usize = 300;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    /// Facility of the professional when the appointment was booked.
    pub facility_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub arrived_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            professional_id: self.professional_id,
            date: self.date,
            time: self.time,
        }
    }
}

/// A (professional, date, time) triple. Several appointments may share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled | AppointmentStatus::NoShow
        )
    }

    /// Whether an appointment in this status counts toward slot occupancy.
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::NoShow)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::InProgress => write!(f, "in_progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    #[default]
    #[serde(alias = "consulta")]
    Consultation,
    #[serde(alias = "followup", alias = "return")]
    FollowUp,
    Exam,
    Procedure,
    Vaccine,
    #[serde(alias = "urgent")]
    UrgentCare,
}

impl AppointmentType {
    pub fn description(&self) -> &'static str {
        match self {
            AppointmentType::Consultation => "Consultation",
            AppointmentType::FollowUp => "Follow-up",
            AppointmentType::Exam => "Exam",
            AppointmentType::Procedure => "Procedure",
            AppointmentType::Vaccine => "Vaccine",
            AppointmentType::UrgentCare => "Urgent care",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Appointment with the facility fields shown to patients.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDetails {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub facility_name: Option<String>,
    pub facility_address: Option<String>,
}

/// A bookable (professional, date, time) with room left.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OpenSlot {
    pub professional_id: Uuid,
    pub professional_name: String,
    pub specialty: Specialty,
    pub facility_id: Uuid,
    pub facility_name: String,
    pub facility_address: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub vacancy: u32,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
}

impl BookAppointmentRequest {
    pub fn validate(&self) -> Result<(), AppointmentError> {
        validate_notes(self.notes.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenSlotQuery {
    pub specialty: Specialty,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

pub fn validate_notes(notes: Option<&str>) -> Result<(), AppointmentError> {
    match notes {
        Some(text) if text.chars().count() > MAX_NOTES_LENGTH => Err(AppointmentError::ValidationError(
            format!("Notes must be at most {} characters", MAX_NOTES_LENGTH),
        )),
        _ => Ok(()),
    }
}

/// Trims the reason and checks its length in characters.
pub fn normalize_cancellation_reason(reason: &str) -> Result<String, AppointmentError> {
    let reason = reason.trim();
    let length = reason.chars().count();
    if !(MIN_CANCELLATION_REASON_LENGTH..=MAX_CANCELLATION_REASON_LENGTH).contains(&length) {
        return Err(AppointmentError::ValidationError(format!(
            "Cancellation reason must be between {} and {} characters",
            MIN_CANCELLATION_REASON_LENGTH, MAX_CANCELLATION_REASON_LENGTH
        )));
    }
    Ok(reason.to_string())
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found: {0}")]
    NotFound(Uuid),

    #[error("Professional {professional_id} has no availability configured on {date}")]
    NoAvailabilityConfigured { professional_id: Uuid, date: NaiveDate },

    #[error("Requested time {time} is outside the professional's working hours")]
    SlotOutsideWindow { time: NaiveTime },

    #[error("No vacancy left at {date} {time}")]
    SlotFull { date: NaiveDate, time: NaiveTime },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Availability(#[from] AvailabilityError),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AppointmentError {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AppointmentError::NoAvailabilityConfigured { .. } => Some("no_availability_configured"),
            AppointmentError::SlotOutsideWindow { .. } => Some("slot_outside_window"),
            AppointmentError::SlotFull { .. } => Some("slot_full"),
            AppointmentError::InvalidTransition(_) => Some("invalid_transition"),
            AppointmentError::PreconditionFailed(_) => Some("precondition_failed"),
            _ => None,
        }
    }
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        if let Some(code) = err.code() {
            return AppError::conflict(code, err.to_string());
        }
        match err {
            AppointmentError::NotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::ValidationError(msg) => AppError::ValidationError(msg),
            AppointmentError::Directory(inner) => inner.into(),
            AppointmentError::Availability(inner) => inner.into(),
            other => AppError::Internal(other.to_string()),
        }
    }
}
