pub mod booking_notifier;
pub mod smtp_notifier;

pub use booking_notifier::{BookingNotifier, DisabledNotifier};
pub use smtp_notifier::SmtpNotifier;
