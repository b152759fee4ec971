use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::Specialty;

use crate::models::JoinWaitlistRequest;
use crate::services::WaitlistService;

pub async fn join_waitlist(
    State(service): State<Arc<WaitlistService>>,
    Json(request): Json<JoinWaitlistRequest>,
) -> Result<Json<Value>, AppError> {
    let position = service.join(request).await?;
    Ok(Json(json!(position)))
}

pub async fn get_entry(
    State(service): State<Arc<WaitlistService>>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let position = service.get(entry_id).await?;
    Ok(Json(json!(position)))
}

pub async fn mark_served(
    State(service): State<Arc<WaitlistService>>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let entry = service.mark_served(entry_id).await?;
    Ok(Json(json!(entry)))
}

pub async fn remove_entry(
    State(service): State<Arc<WaitlistService>>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    service.remove(entry_id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn get_specialty_queue(
    State(service): State<Arc<WaitlistService>>,
    Path(specialty): Path<Specialty>,
) -> Result<Json<Value>, AppError> {
    let entries = service.ordered(specialty).await?;
    Ok(Json(json!({
        "specialty": specialty,
        "entries": entries,
        "total": entries.len()
    })))
}

pub async fn get_facility_queue(
    State(service): State<Arc<WaitlistService>>,
    Path(facility_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let entries = service.ordered_by_facility(facility_id).await?;
    Ok(Json(json!({
        "entries": entries,
        "total": entries.len()
    })))
}

pub async fn get_patient_entries(
    State(service): State<Arc<WaitlistService>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let entries = service.list_by_patient(patient_id).await?;
    Ok(Json(json!({
        "entries": entries,
        "total": entries.len()
    })))
}
