pub mod booking;
pub mod conflict;
pub mod consistency;
pub mod lifecycle;

pub use booking::{AppointmentBookingService, Directories};
pub use conflict::ConflictDetectionService;
pub use consistency::SchedulingConsistencyService;
pub use lifecycle::AppointmentLifecycleService;
