pub mod directory;
pub mod memory;

pub use directory::{FacilityDirectory, PatientDirectory, ProfessionalDirectory};
pub use memory::InMemoryDirectory;
