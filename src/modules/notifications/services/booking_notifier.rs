use async_trait::async_trait;
use tracing::debug;

use crate::core::Result;
use crate::modules::bookings::models::Booking;
use crate::modules::catalog::models::CareService;

/// Sends booking notifications to customers.
///
/// Callers run this off the request path and only log failures.
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn booking_created(&self, booking: &Booking, service: &CareService) -> Result<()>;
}

/// Used when SMTP credentials are missing; drops every notification
pub struct DisabledNotifier;

#[async_trait]
impl BookingNotifier for DisabledNotifier {
    async fn booking_created(&self, booking: &Booking, _service: &CareService) -> Result<()> {
        debug!(booking_id = %booking.id, "Mail disabled, invoice not sent");
        Ok(())
    }
}
