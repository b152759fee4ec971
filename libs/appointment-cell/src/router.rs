// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::{AppointmentBookingService, AppointmentLifecycleService};

#[derive(Clone)]
pub struct AppointmentState {
    pub booking: Arc<AppointmentBookingService>,
    pub lifecycle: Arc<AppointmentLifecycleService>,
}

pub fn appointment_routes(state: AppointmentState) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}/confirm", post(handlers::confirm_appointment))
        .route("/{appointment_id}/arrival", post(handlers::record_arrival))
        .route("/{appointment_id}/start", post(handlers::start_service))
        .route("/{appointment_id}/complete", post(handlers::complete_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route("/{appointment_id}/no-show", post(handlers::mark_no_show))
        .route("/patients/{patient_id}", get(handlers::get_patient_appointments))
        .route("/patients/{patient_id}/history", get(handlers::get_patient_history))
        .route("/professionals/{professional_id}", get(handlers::get_professional_agenda))
        .route("/facilities/{facility_id}", get(handlers::get_facility_agenda))
        .with_state(state)
}

pub fn slot_routes(state: AppointmentState) -> Router {
    Router::new()
        .route("/", get(handlers::list_open_slots))
        .with_state(state)
}
