mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Weekday;
use futures::future::join_all;

use appointment_cell::{
    Appointment, AppointmentError, AppointmentStatus, AppointmentType, BookAppointmentRequest,
};
use shared_models::Specialty;
use shared_utils::test_utils::{hm, next_weekday};

use common::TestClinic;

async fn booked(clinic: &TestClinic) -> Appointment {
    let professional = clinic.professional("Dra. Beatriz Lopes", Specialty::GeneralPractice).await;
    clinic
        .template(professional.id, Weekday::Thu, hm(8, 0), hm(12, 0), 30, 2)
        .await;
    let patient = clinic.patient("Joao Pereira").await;

    clinic
        .booking
        .book(BookAppointmentRequest {
            patient_id: patient,
            professional_id: professional.id,
            date: next_weekday(Weekday::Thu),
            time: hm(9, 30),
            appointment_type: AppointmentType::FollowUp,
            notes: Some("Retorno com exames".to_string()),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_full_lifecycle_to_completion() {
    let clinic = TestClinic::new().await;
    let appointment = booked(&clinic).await;

    let confirmed = clinic.lifecycle.confirm(appointment.id).await.unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
    assert!(confirmed.confirmed_at.is_some());

    let arrived = clinic.lifecycle.record_arrival(appointment.id).await.unwrap();
    assert_eq!(arrived.status, AppointmentStatus::Confirmed);
    assert!(arrived.arrived_at.is_some());

    let started = clinic.lifecycle.start_service(appointment.id).await.unwrap();
    assert_eq!(started.status, AppointmentStatus::InProgress);
    assert!(started.started_at.is_some());

    let completed = clinic.lifecycle.complete(appointment.id).await.unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);
    assert!(completed.ended_at.is_some());

    assert_matches!(
        clinic.lifecycle.cancel(appointment.id, "patient requested").await,
        Err(AppointmentError::InvalidTransition(_))
    );

    let stored = clinic.booking.get_appointment(appointment.id).await.unwrap();
    assert_eq!(stored.status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn test_confirm_is_not_idempotent() {
    let clinic = TestClinic::new().await;
    let appointment = booked(&clinic).await;

    clinic.lifecycle.confirm(appointment.id).await.unwrap();
    assert_matches!(
        clinic.lifecycle.confirm(appointment.id).await,
        Err(AppointmentError::InvalidTransition(_))
    );
}

#[tokio::test]
async fn test_start_requires_arrival() {
    let clinic = TestClinic::new().await;
    let appointment = booked(&clinic).await;

    clinic.lifecycle.confirm(appointment.id).await.unwrap();
    assert_matches!(
        clinic.lifecycle.start_service(appointment.id).await,
        Err(AppointmentError::PreconditionFailed(_))
    );
}

#[tokio::test]
async fn test_cancel_validates_reason() {
    let clinic = TestClinic::new().await;
    let appointment = booked(&clinic).await;

    assert_matches!(
        clinic.lifecycle.cancel(appointment.id, "   short   ").await,
        Err(AppointmentError::ValidationError(_))
    );
    assert_matches!(
        clinic.lifecycle.cancel(appointment.id, &"r".repeat(301)).await,
        Err(AppointmentError::ValidationError(_))
    );

    let unchanged = clinic.booking.get_appointment(appointment.id).await.unwrap();
    assert_eq!(unchanged.status, AppointmentStatus::Scheduled);

    let cancelled = clinic
        .lifecycle
        .cancel(appointment.id, "  schedule conflict at work  ")
        .await
        .unwrap();
    assert_eq!(cancelled.cancellation_reason.as_deref(), Some("schedule conflict at work"));

    assert_matches!(
        clinic.lifecycle.cancel(appointment.id, "patient requested").await,
        Err(AppointmentError::InvalidTransition(_))
    );
}

#[tokio::test]
async fn test_no_show_frees_the_slot() {
    let clinic = TestClinic::new().await;
    let appointment = booked(&clinic).await;

    let no_show = clinic.lifecycle.mark_no_show(appointment.id).await.unwrap();
    assert_eq!(no_show.status, AppointmentStatus::NoShow);

    assert_matches!(
        clinic.lifecycle.record_arrival(appointment.id).await,
        Err(AppointmentError::InvalidTransition(_))
    );

    let open = clinic
        .booking
        .list_open_slots(Specialty::GeneralPractice, appointment.date, appointment.date)
        .await
        .unwrap();
    let slot = open.iter().find(|s| s.time == appointment.time).unwrap();
    assert_eq!(slot.vacancy, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_confirms_succeed_once() {
    let clinic = TestClinic::new().await;
    let appointment = booked(&clinic).await;

    let attempts = (0..8).map(|_| {
        let lifecycle = Arc::clone(&clinic.lifecycle);
        let id = appointment.id;
        tokio::spawn(async move { lifecycle.confirm(id).await })
    });
    let results: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(AppointmentError::InvalidTransition(_))))
            .count(),
        7
    );
}
