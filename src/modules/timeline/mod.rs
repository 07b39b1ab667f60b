// Timeline module: care activity log per booking

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{EventType, TimelineEvent};
pub use repositories::{MySqlTimelineRepository, TimelineRepository};
pub use services::TimelineService;
