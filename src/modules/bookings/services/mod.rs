pub mod booking_service;
pub mod rate_calculator;

pub use booking_service::BookingService;
pub use rate_calculator::{convert_rate, quote, PriceQuote, RATE_SCALE};
