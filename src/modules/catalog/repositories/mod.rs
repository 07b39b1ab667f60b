pub mod care_service_repository;

pub use care_service_repository::{CareServiceRepository, MySqlCareServiceRepository};
