pub mod error;
pub mod priority;
pub mod specialty;

pub use priority::Priority;
pub use specialty::Specialty;
