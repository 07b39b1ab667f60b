mod care_service;

pub use care_service::{
    CareService, CreateServiceRequest, Pricing, ServiceStatus, UpdateServiceRequest,
};
