use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::InMemoryDirectory;

pub fn directory_routes(directory: Arc<InMemoryDirectory>) -> Router {
    Router::new()
        .route("/facilities", post(handlers::register_facility))
        .route("/facilities/{facility_id}", get(handlers::get_facility))
        .route("/professionals", post(handlers::register_professional))
        .route(
            "/professionals/{professional_id}",
            get(handlers::get_professional).patch(handlers::update_professional),
        )
        .route("/professionals/{professional_id}/deactivate", post(handlers::deactivate_professional))
        .route("/patients", post(handlers::register_patient))
        .route("/patients/{patient_id}", get(handlers::get_patient))
        .route("/patients/{patient_id}/deactivate", post(handlers::deactivate_patient))
        .with_state(directory)
}
