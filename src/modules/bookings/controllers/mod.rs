pub mod booking_controller;

pub use booking_controller::configure;
