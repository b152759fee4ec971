use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::AvailabilityService;

pub fn availability_routes(service: Arc<AvailabilityService>) -> Router {
    Router::new()
        .route("/", post(handlers::create_template))
        .route(
            "/{template_id}",
            get(handlers::get_template)
                .put(handlers::update_template)
                .delete(handlers::delete_template),
        )
        .route("/{template_id}/activate", post(handlers::activate_template))
        .route("/{template_id}/deactivate", post(handlers::deactivate_template))
        .route("/professional/{professional_id}", get(handlers::list_professional_templates))
        .route("/professional/{professional_id}/slots", get(handlers::preview_slots))
        .with_state(service)
}
