//! NestCare home-care booking API
//!
//! Care-service catalog, priced bookings with status tracking, per-booking
//! care timelines, service recommendations and an admin console.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod state;

pub use state::{AppState, Repositories};
