pub mod booking;

pub use booking::{
    Booking, BookingStatus, CreateBookingRequest, CustomerContact, CustomerInput, Location,
    UpdateStatusRequest,
};
