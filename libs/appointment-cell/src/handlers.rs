// libs/appointment-cell/src/handlers.rs
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

use crate::models::{BookAppointmentRequest, CancelAppointmentRequest, OpenSlotQuery};
use crate::router::AppointmentState;

// ==============================================================================
// QUERY PARAMETER STRUCTS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

// ==============================================================================
// BOOKING HANDLERS
// ==============================================================================

pub async fn book_appointment(
    State(state): State<AppointmentState>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.booking.book(request).await?;
    Ok(Json(json!(appointment)))
}

pub async fn list_open_slots(
    State(state): State<AppointmentState>,
    Query(query): Query<OpenSlotQuery>,
) -> Result<Json<Value>, AppError> {
    let slots = state
        .booking
        .list_open_slots(query.specialty, query.date_from, query.date_to)
        .await?;
    Ok(Json(json!({
        "slots": slots,
        "total": slots.len()
    })))
}

pub async fn get_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let details = state.booking.get_appointment_details(appointment_id).await?;
    Ok(Json(json!(details)))
}

pub async fn get_patient_appointments(
    State(state): State<AppointmentState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.booking.list_by_patient(patient_id).await?;
    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

pub async fn get_patient_history(
    State(state): State<AppointmentState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.booking.patient_history(patient_id).await?;
    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

pub async fn get_professional_agenda(
    State(state): State<AppointmentState>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .booking
        .list_by_professional_and_date(professional_id, query.date)
        .await?;
    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

pub async fn get_facility_agenda(
    State(state): State<AppointmentState>,
    Path(facility_id): Path<Uuid>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .booking
        .list_by_facility_and_date(facility_id, query.date)
        .await?;
    Ok(Json(json!({
        "appointments": appointments,
        "total": appointments.len()
    })))
}

// ==============================================================================
// LIFECYCLE HANDLERS
// ==============================================================================

pub async fn confirm_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.lifecycle.confirm(appointment_id).await?;
    Ok(Json(json!(appointment)))
}

pub async fn record_arrival(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.lifecycle.record_arrival(appointment_id).await?;
    Ok(Json(json!(appointment)))
}

pub async fn start_service(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.lifecycle.start_service(appointment_id).await?;
    Ok(Json(json!(appointment)))
}

pub async fn complete_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.lifecycle.complete(appointment_id).await?;
    Ok(Json(json!(appointment)))
}

pub async fn cancel_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.lifecycle.cancel(appointment_id, &request.reason).await?;
    info!("Appointment {} cancelled", appointment_id);
    Ok(Json(json!(appointment)))
}

pub async fn mark_no_show(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.lifecycle.mark_no_show(appointment_id).await?;
    Ok(Json(json!(appointment)))
}
