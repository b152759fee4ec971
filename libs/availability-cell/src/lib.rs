pub mod handlers;
pub mod models;
pub mod router;
pub mod services;
pub mod store;

pub use models::*;
pub use services::*;
pub use store::{InMemoryTemplateRepository, TemplateRepository};
pub use router::availability_routes;
