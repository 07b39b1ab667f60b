// Notifications module: booking invoice e-mail

pub mod models;
pub mod services;

pub use models::{render_invoice, InvoiceEmail};
pub use services::{BookingNotifier, DisabledNotifier, SmtpNotifier};
