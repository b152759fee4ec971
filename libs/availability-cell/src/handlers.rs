use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::TemplateRequest;
use crate::services::{AvailabilityService, SlotCalculator};

#[derive(Debug, Deserialize)]
pub struct SlotPreviewQuery {
    pub date: NaiveDate,
}

pub async fn create_template(
    State(service): State<Arc<AvailabilityService>>,
    Json(request): Json<TemplateRequest>,
) -> Result<Json<Value>, AppError> {
    let template = service.create_template(request).await?;
    Ok(Json(json!(template)))
}

pub async fn get_template(
    State(service): State<Arc<AvailabilityService>>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let template = service.get_template(template_id).await?;
    Ok(Json(json!(template)))
}

pub async fn update_template(
    State(service): State<Arc<AvailabilityService>>,
    Path(template_id): Path<Uuid>,
    Json(request): Json<TemplateRequest>,
) -> Result<Json<Value>, AppError> {
    let template = service.update_template(template_id, request).await?;
    Ok(Json(json!(template)))
}

pub async fn delete_template(
    State(service): State<Arc<AvailabilityService>>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    service.delete(template_id).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn activate_template(
    State(service): State<Arc<AvailabilityService>>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let template = service.activate(template_id).await?;
    Ok(Json(json!(template)))
}

pub async fn deactivate_template(
    State(service): State<Arc<AvailabilityService>>,
    Path(template_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let template = service.deactivate(template_id).await?;
    Ok(Json(json!(template)))
}

pub async fn list_professional_templates(
    State(service): State<Arc<AvailabilityService>>,
    Path(professional_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let templates = service.list_active(professional_id).await?;
    Ok(Json(json!({
        "templates": templates,
        "total": templates.len()
    })))
}

/// Candidate slot times for a date, before any occupancy is applied.
pub async fn preview_slots(
    State(service): State<Arc<AvailabilityService>>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<SlotPreviewQuery>,
) -> Result<Json<Value>, AppError> {
    info!("Slot preview for professional {} on {}", professional_id, query.date);

    let calculator = SlotCalculator::new(service);
    let schedule = calculator.day_schedule(professional_id, query.date).await?;
    let slots: Vec<Value> = schedule
        .slots()
        .map(|slot| {
            json!({
                "time": slot.time,
                "template_id": slot.template.id,
                "capacity": slot.capacity()
            })
        })
        .collect();

    Ok(Json(json!({
        "professional_id": professional_id,
        "date": query.date,
        "slots": slots
    })))
}
