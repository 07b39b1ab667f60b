// Catalog module: bookable care services

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CareService, Pricing, ServiceStatus};
pub use repositories::{CareServiceRepository, MySqlCareServiceRepository};
pub use services::CatalogService;
