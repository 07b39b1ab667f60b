// Bookings module: pricing quotes, booking records and their status

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Booking, BookingStatus, CustomerContact, Location};
pub use repositories::{BookingRepository, MySqlBookingRepository};
pub use services::BookingService;
