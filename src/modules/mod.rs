pub mod accounts;
pub mod admin;
pub mod bookings;
pub mod catalog;
pub mod health;
pub mod notifications;
pub mod recommendations;
pub mod timeline;
