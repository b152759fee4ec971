pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::*;
pub use router::{appointment_routes, slot_routes, AppointmentState};
pub use services::*;
pub use store::{AppointmentRepository, InMemoryAppointmentRepository};
