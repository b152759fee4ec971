// libs/appointment-cell/src/services/lifecycle.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{normalize_cancellation_reason, Appointment, AppointmentError, AppointmentStatus};
use crate::services::consistency::SchedulingConsistencyService;

/// Scheduled -> Confirmed -> InProgress -> Completed, with Cancelled and
/// NoShow as side exits. Arrival is a timestamp, not a status.
pub struct AppointmentLifecycleService {
    consistency: Arc<SchedulingConsistencyService>,
}

impl AppointmentLifecycleService {
    pub fn new(consistency: Arc<SchedulingConsistencyService>) -> Self {
        Self { consistency }
    }

    pub async fn confirm(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        info!("Confirming appointment: {}", id);
        self.transition(id, |a| confirm(a, Utc::now())).await
    }

    pub async fn record_arrival(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        info!("Recording arrival for appointment: {}", id);
        self.transition(id, |a| record_arrival(a, Utc::now())).await
    }

    pub async fn start_service(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        info!("Starting service for appointment: {}", id);
        self.transition(id, |a| start_service(a, Utc::now())).await
    }

    pub async fn complete(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        info!("Completing appointment: {}", id);
        self.transition(id, |a| complete(a, Utc::now())).await
    }

    pub async fn cancel(&self, id: Uuid, reason: &str) -> Result<Appointment, AppointmentError> {
        info!("Cancelling appointment: {}", id);
        let reason = normalize_cancellation_reason(reason)?;
        self.transition(id, move |a| cancel(a, reason)).await
    }

    pub async fn mark_no_show(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        info!("Marking no-show for appointment: {}", id);
        self.transition(id, mark_no_show).await
    }

    async fn transition<F>(&self, id: Uuid, guard: F) -> Result<Appointment, AppointmentError>
    where
        F: FnOnce(&mut Appointment) -> Result<(), AppointmentError> + Send,
    {
        let result = self.consistency.atomic_transition(id, guard).await;
        if let Err(e) = &result {
            warn!("Transition rejected for appointment {}: {}", id, e);
        }
        result
    }
}

// ==============================================================================
// GUARDS
// ==============================================================================

fn invalid(message: &str, current: AppointmentStatus) -> AppointmentError {
    AppointmentError::InvalidTransition(format!("{} (current status: {})", message, current))
}

pub fn confirm(appointment: &mut Appointment, now: DateTime<Utc>) -> Result<(), AppointmentError> {
    if appointment.status != AppointmentStatus::Scheduled {
        return Err(invalid("only scheduled appointments can be confirmed", appointment.status));
    }
    appointment.status = AppointmentStatus::Confirmed;
    appointment.confirmed_at = Some(now);
    Ok(())
}

/// Stamps the arrival time without touching the status.
pub fn record_arrival(appointment: &mut Appointment, now: DateTime<Utc>) -> Result<(), AppointmentError> {
    if !matches!(
        appointment.status,
        AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
    ) {
        return Err(invalid(
            "arrival can only be recorded for scheduled or confirmed appointments",
            appointment.status,
        ));
    }
    appointment.arrived_at = Some(now);
    Ok(())
}

pub fn start_service(appointment: &mut Appointment, now: DateTime<Utc>) -> Result<(), AppointmentError> {
    if appointment.arrived_at.is_none() {
        return Err(AppointmentError::PreconditionFailed(
            "arrival must be recorded first".to_string(),
        ));
    }
    if !matches!(
        appointment.status,
        AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
    ) {
        return Err(invalid(
            "service can only start for scheduled or confirmed appointments",
            appointment.status,
        ));
    }
    appointment.status = AppointmentStatus::InProgress;
    appointment.started_at = Some(now);
    Ok(())
}

pub fn complete(appointment: &mut Appointment, now: DateTime<Utc>) -> Result<(), AppointmentError> {
    if appointment.status != AppointmentStatus::InProgress {
        return Err(invalid("only appointments in progress can be completed", appointment.status));
    }
    appointment.status = AppointmentStatus::Completed;
    appointment.ended_at = Some(now);
    Ok(())
}

/// `reason` must already be normalized.
pub fn cancel(appointment: &mut Appointment, reason: String) -> Result<(), AppointmentError> {
    if appointment.status.is_terminal() {
        return Err(invalid(
            "completed, cancelled or no-show appointments cannot be cancelled",
            appointment.status,
        ));
    }
    appointment.status = AppointmentStatus::Cancelled;
    appointment.cancellation_reason = Some(reason);
    Ok(())
}

pub fn mark_no_show(appointment: &mut Appointment) -> Result<(), AppointmentError> {
    if !matches!(
        appointment.status,
        AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
    ) {
        return Err(invalid(
            "only scheduled or confirmed appointments can be marked as no-show",
            appointment.status,
        ));
    }
    appointment.status = AppointmentStatus::NoShow;
    Ok(())
}
