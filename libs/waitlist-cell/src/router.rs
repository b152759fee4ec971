use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::WaitlistService;

pub fn waitlist_routes(service: Arc<WaitlistService>) -> Router {
    Router::new()
        .route("/", post(handlers::join_waitlist))
        .route("/{entry_id}", get(handlers::get_entry).delete(handlers::remove_entry))
        .route("/{entry_id}/served", post(handlers::mark_served))
        .route("/specialty/{specialty}", get(handlers::get_specialty_queue))
        .route("/facility/{facility_id}", get(handlers::get_facility_queue))
        .route("/patients/{patient_id}", get(handlers::get_patient_entries))
        .with_state(service)
}
