pub mod slots;
pub mod templates;

pub use slots::{DaySchedule, DaySlots, SlotCalculator, SlotCandidate, SlotTimes};
pub use templates::AvailabilityService;
