use thiserror::Error;
use uuid::Uuid;

use directory_cell::DirectoryError;
use shared_models::error::AppError;
use shared_models::Specialty;

#[derive(Error, Debug, Clone)]
pub enum WaitlistError {
    #[error("Waitlist entry not found: {0}")]
    EntryNotFound(Uuid),

    #[error("Patient {patient_id} is already waiting for {specialty}")]
    AlreadyQueued { patient_id: Uuid, specialty: Specialty },

    #[error("Waitlist entry {0} was already served")]
    AlreadyServed(Uuid),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<WaitlistError> for AppError {
    fn from(err: WaitlistError) -> Self {
        match err {
            WaitlistError::EntryNotFound(_) => AppError::NotFound(err.to_string()),
            WaitlistError::AlreadyQueued { .. } => AppError::conflict("already_queued", err.to_string()),
            WaitlistError::AlreadyServed(_) => AppError::conflict("already_served", err.to_string()),
            WaitlistError::ValidationError(msg) => AppError::ValidationError(msg),
            WaitlistError::Directory(inner) => inner.into(),
            WaitlistError::StorageError(msg) => AppError::Internal(msg),
        }
    }
}
