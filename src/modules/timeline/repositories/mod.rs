pub mod timeline_repository;

pub use timeline_repository::{MySqlTimelineRepository, TimelineRepository};
