pub mod timeline_controller;

pub use timeline_controller::configure;
