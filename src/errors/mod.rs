// Errors layer - internal taxonomy and API mapping
pub mod api;
pub mod domain;

pub use api::ApiError;
pub use domain::DomainError;
