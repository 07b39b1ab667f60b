pub mod recommendation_controller;

pub use recommendation_controller::configure;
