pub mod currency;
pub mod duration_unit;
pub mod error;

pub use currency::Currency;
pub use duration_unit::{DurationUnit, HOURS_PER_DAY};
pub use error::{AppError, Result};
