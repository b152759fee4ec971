use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{
    appointment_routes, slot_routes, AppointmentBookingService, AppointmentLifecycleService,
    AppointmentState, ConflictDetectionService, Directories, InMemoryAppointmentRepository,
    SchedulingConsistencyService,
};
use availability_cell::{
    availability_routes, AvailabilityService, InMemoryTemplateRepository, SlotCalculator,
};
use directory_cell::{directory_routes, InMemoryDirectory};
use shared_config::AppConfig;
use waitlist_cell::{waitlist_routes, InMemoryWaitlistRepository, WaitlistService};

pub fn create_router(config: Arc<AppConfig>) -> Router {
    let directory = Arc::new(InMemoryDirectory::new());

    let availability = Arc::new(AvailabilityService::new(
        Arc::new(InMemoryTemplateRepository::new()),
        directory.clone(),
    ));
    let calculator = Arc::new(SlotCalculator::new(availability.clone()));

    let ledger = Arc::new(InMemoryAppointmentRepository::new());
    let conflicts = Arc::new(ConflictDetectionService::new(ledger.clone()));
    let consistency = Arc::new(SchedulingConsistencyService::new(ledger.clone(), conflicts.clone()));
    let appointments = AppointmentState {
        booking: Arc::new(AppointmentBookingService::new(
            config,
            Directories::from_single(directory.clone()),
            calculator,
            ledger,
            conflicts,
            consistency.clone(),
        )),
        lifecycle: Arc::new(AppointmentLifecycleService::new(consistency)),
    };

    let waitlist = Arc::new(WaitlistService::new(
        Arc::new(InMemoryWaitlistRepository::new()),
        directory.clone(),
        directory.clone(),
    ));

    Router::new()
        .route("/", get(|| async { "SUS Agenda API is running!" }))
        .nest("/directory", directory_routes(directory))
        .nest("/availability", availability_routes(availability))
        .nest("/appointments", appointment_routes(appointments.clone()))
        .nest("/slots", slot_routes(appointments))
        .nest("/waitlist", waitlist_routes(waitlist))
}
