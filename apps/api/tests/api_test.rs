use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Weekday;
use serde_json::{json, Value};
use tower::ServiceExt;

use shared_utils::test_utils::{next_weekday, TestConfig};
use susagenda_api::router::create_router;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_root_is_alive() {
    let app = create_router(Arc::new(TestConfig::default().to_app_config()));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_booking_flow_across_cells() {
    let app = create_router(Arc::new(TestConfig::default().to_app_config()));

    let (status, facility) = send(
        &app,
        "POST",
        "/directory/facilities",
        Some(json!({ "name": "UBS Central", "address": "Praca da Se, 1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, professional) = send(
        &app,
        "POST",
        "/directory/professionals",
        Some(json!({
            "name": "Dra. Olivia Ramos",
            "specialty": "general_practice",
            "facility_id": facility["id"]
        })),
    )
    .await;
    let (_, patient) = send(
        &app,
        "POST",
        "/directory/patients",
        Some(json!({ "name": "Pedro Alves", "date_of_birth": "1950-02-01" })),
    )
    .await;
    assert_eq!(patient["priority"], "elderly");

    let (status, _) = send(
        &app,
        "POST",
        "/availability",
        Some(json!({
            "professional_id": professional["id"],
            "weekday": "Mon",
            "start_time": "08:00:00",
            "end_time": "09:00:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let monday = next_weekday(Weekday::Mon);
    let (status, appointment) = send(
        &app,
        "POST",
        "/appointments",
        Some(json!({
            "patient_id": patient["id"],
            "professional_id": professional["id"],
            "date": monday,
            "time": "08:00:00",
            "appointment_type": "consultation"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(appointment["status"], "scheduled");

    let id = appointment["id"].as_str().unwrap();
    let (status, details) = send(&app, "GET", &format!("/appointments/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["facility_name"], "UBS Central");

    let (status, body) = send(&app, "POST", &format!("/appointments/{}/start", id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "precondition_failed");

    let (_, slots) = send(
        &app,
        "GET",
        &format!("/slots?specialty=general_practice&date_from={}&date_to={}", monday, monday),
        None,
    )
    .await;
    assert_eq!(slots["total"], 1);

    let (status, entry) = send(
        &app,
        "POST",
        "/waitlist",
        Some(json!({ "patient_id": patient["id"], "specialty": "cardiology" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["position"], 1);
}
