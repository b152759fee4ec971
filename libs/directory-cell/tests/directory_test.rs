use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use uuid::Uuid;

use directory_cell::{
    DirectoryError, FacilityDirectory, InMemoryDirectory, PatientDirectory, ProfessionalDirectory,
    RegisterFacilityRequest, RegisterPatientRequest, RegisterProfessionalRequest,
    UpdateProfessionalRequest,
};
use shared_models::{Priority, Specialty};

async fn facility(directory: &InMemoryDirectory) -> Uuid {
    directory
        .register_facility(RegisterFacilityRequest {
            name: "  UBS Centro  ".to_string(),
            address: "Rua XV de Novembro, 300".to_string(),
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_register_and_lookup_facility() {
    let directory = InMemoryDirectory::new();
    let id = facility(&directory).await;

    let found = directory.get_facility(id).await.unwrap();
    assert_eq!(found.name, "UBS Centro");
    assert_matches!(
        directory.get_facility(Uuid::new_v4()).await,
        Err(DirectoryError::FacilityNotFound(_))
    );
}

#[tokio::test]
async fn test_professional_requires_active_facility() {
    let directory = InMemoryDirectory::new();

    let result = directory
        .register_professional(RegisterProfessionalRequest {
            name: "Dr. Otavio Lima".to_string(),
            specialty: Specialty::Cardiology,
            facility_id: Uuid::new_v4(),
        })
        .await;
    assert_matches!(result, Err(DirectoryError::FacilityNotFound(_)));

    let result = directory
        .register_professional(RegisterProfessionalRequest {
            name: "   ".to_string(),
            specialty: Specialty::Cardiology,
            facility_id: facility(&directory).await,
        })
        .await;
    assert_matches!(result, Err(DirectoryError::ValidationError(_)));
}

#[tokio::test]
async fn test_list_by_specialty_skips_inactive() {
    let directory = InMemoryDirectory::new();
    let facility_id = facility(&directory).await;

    let mut ids = Vec::new();
    for (name, specialty) in [
        ("Dra. Zelia Rocha", Specialty::Neurology),
        ("Dr. Mauro Teles", Specialty::Neurology),
        ("Dra. Nina Paz", Specialty::Urology),
    ] {
        let professional = directory
            .register_professional(RegisterProfessionalRequest {
                name: name.to_string(),
                specialty,
                facility_id,
            })
            .await
            .unwrap();
        ids.push(professional.id);
    }

    let names: Vec<String> = directory
        .list_by_specialty(Specialty::Neurology)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Dr. Mauro Teles", "Dra. Zelia Rocha"]);

    directory.deactivate_professional(ids[1]).await.unwrap();
    assert_eq!(directory.list_by_specialty(Specialty::Neurology).await.unwrap().len(), 1);
    assert_matches!(
        directory.get_professional(ids[1]).await,
        Err(DirectoryError::ProfessionalNotFound(_))
    );
}

#[tokio::test]
async fn test_update_professional_moves_facility() {
    let directory = InMemoryDirectory::new();
    let first = facility(&directory).await;
    let second = facility(&directory).await;

    let professional = directory
        .register_professional(RegisterProfessionalRequest {
            name: "Dra. Rita Mello".to_string(),
            specialty: Specialty::Pediatrics,
            facility_id: first,
        })
        .await
        .unwrap();

    let updated = directory
        .update_professional(
            professional.id,
            UpdateProfessionalRequest {
                facility_id: Some(second),
                specialty: Some(Specialty::GeneralPractice),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.facility_id, second);
    assert_eq!(updated.specialty, Specialty::GeneralPractice);
    assert_eq!(updated.name, "Dra. Rita Mello");

    let result = directory
        .update_professional(
            professional.id,
            UpdateProfessionalRequest {
                facility_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(result, Err(DirectoryError::FacilityNotFound(_)));
}

#[tokio::test]
async fn test_patient_priority_from_age() {
    let directory = InMemoryDirectory::new();
    let today = Utc::now().date_naive();

    let child = directory
        .register_patient(RegisterPatientRequest {
            name: "Lucas".to_string(),
            date_of_birth: today - Duration::days(365 * 5),
            priority: None,
        })
        .await
        .unwrap();
    assert_eq!(child.priority, Priority::Child);

    let twelve = directory
        .register_patient(RegisterPatientRequest {
            name: "Marina".to_string(),
            date_of_birth: today - Duration::days(365 * 12 + 30),
            priority: None,
        })
        .await
        .unwrap();
    assert_eq!(twelve.priority, Priority::Child);

    let thirteen = directory
        .register_patient(RegisterPatientRequest {
            name: "Otavio".to_string(),
            date_of_birth: today - Duration::days(365 * 13 + 30),
            priority: None,
        })
        .await
        .unwrap();
    assert_eq!(thirteen.priority, Priority::Normal);

    let elderly = directory
        .register_patient(RegisterPatientRequest {
            name: "Dona Maria".to_string(),
            date_of_birth: today - Duration::days(365 * 70),
            priority: None,
        })
        .await
        .unwrap();
    assert_eq!(elderly.priority, Priority::Elderly);

    let adult = directory
        .register_patient(RegisterPatientRequest {
            name: "Rafael".to_string(),
            date_of_birth: today - Duration::days(365 * 30),
            priority: None,
        })
        .await
        .unwrap();
    assert_eq!(adult.priority, Priority::Normal);

    let explicit = directory
        .register_patient(RegisterPatientRequest {
            name: "Sofia".to_string(),
            date_of_birth: today - Duration::days(365 * 70),
            priority: Some(Priority::Urgent),
        })
        .await
        .unwrap();
    assert_eq!(explicit.priority, Priority::Urgent);
}

#[tokio::test]
async fn test_patient_lifecycle() {
    let directory = InMemoryDirectory::new();
    let today = Utc::now().date_naive();

    assert_matches!(
        directory
            .register_patient(RegisterPatientRequest {
                name: "Futuro".to_string(),
                date_of_birth: today + Duration::days(1),
                priority: None,
            })
            .await,
        Err(DirectoryError::ValidationError(_))
    );

    let patient = directory
        .register_patient(RegisterPatientRequest {
            name: "Tania".to_string(),
            date_of_birth: today - Duration::days(365 * 40),
            priority: None,
        })
        .await
        .unwrap();

    let promoted = directory.set_patient_priority(patient.id, Priority::Pregnant).await.unwrap();
    assert_eq!(promoted.priority, Priority::Pregnant);

    directory.deactivate_patient(patient.id).await.unwrap();
    assert_matches!(
        directory.get_patient(patient.id).await,
        Err(DirectoryError::PatientNotFound(_))
    );
}
