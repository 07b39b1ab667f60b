// Admin console: stats and maintenance endpoints behind the admin role

pub mod controllers;
pub mod models;
pub mod services;

pub use models::DashboardStats;
pub use services::AdminService;
