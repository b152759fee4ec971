use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    RegisterFacilityRequest, RegisterPatientRequest, RegisterProfessionalRequest,
    UpdateProfessionalRequest,
};
use crate::services::{FacilityDirectory, InMemoryDirectory, PatientDirectory, ProfessionalDirectory};

pub async fn register_facility(
    State(directory): State<Arc<InMemoryDirectory>>,
    Json(request): Json<RegisterFacilityRequest>,
) -> Result<Json<Value>, AppError> {
    let facility = directory.register_facility(request).await?;
    Ok(Json(json!(facility)))
}

pub async fn get_facility(
    State(directory): State<Arc<InMemoryDirectory>>,
    Path(facility_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let facility = directory.get_facility(facility_id).await?;
    Ok(Json(json!(facility)))
}

pub async fn register_professional(
    State(directory): State<Arc<InMemoryDirectory>>,
    Json(request): Json<RegisterProfessionalRequest>,
) -> Result<Json<Value>, AppError> {
    let professional = directory.register_professional(request).await?;
    Ok(Json(json!(professional)))
}

pub async fn get_professional(
    State(directory): State<Arc<InMemoryDirectory>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let professional = directory.get_professional(professional_id).await?;
    Ok(Json(json!(professional)))
}

pub async fn update_professional(
    State(directory): State<Arc<InMemoryDirectory>>,
    Path(professional_id): Path<Uuid>,
    Json(request): Json<UpdateProfessionalRequest>,
) -> Result<Json<Value>, AppError> {
    let professional = directory.update_professional(professional_id, request).await?;
    Ok(Json(json!(professional)))
}

pub async fn deactivate_professional(
    State(directory): State<Arc<InMemoryDirectory>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    info!("Deactivate request for professional: {}", professional_id);
    directory.deactivate_professional(professional_id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn register_patient(
    State(directory): State<Arc<InMemoryDirectory>>,
    Json(request): Json<RegisterPatientRequest>,
) -> Result<Json<Value>, AppError> {
    let patient = directory.register_patient(request).await?;
    Ok(Json(json!(patient)))
}

pub async fn get_patient(
    State(directory): State<Arc<InMemoryDirectory>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let patient = directory.get_patient(patient_id).await?;
    Ok(Json(json!(patient)))
}

pub async fn deactivate_patient(
    State(directory): State<Arc<InMemoryDirectory>>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    info!("Deactivate request for patient: {}", patient_id);
    directory.deactivate_patient(patient_id).await?;
    Ok(Json(json!({ "success": true })))
}
