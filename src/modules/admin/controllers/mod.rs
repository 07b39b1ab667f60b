pub mod admin_controller;

pub use admin_controller::configure;
