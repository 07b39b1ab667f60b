use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{AppError, DurationUnit, Result};
use crate::modules::accounts::models::User;
use crate::modules::bookings::models::{
    Booking, BookingStatus, CreateBookingRequest, CustomerContact, CustomerInput, Location,
};
use crate::modules::bookings::repositories::BookingRepository;
use crate::modules::bookings::services::rate_calculator;
use crate::modules::catalog::models::CareService;
use crate::modules::catalog::repositories::CareServiceRepository;
use crate::modules::notifications::BookingNotifier;

/// Service for booking creation, lookup and status changes
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn CareServiceRepository>,
    notifier: Arc<dyn BookingNotifier>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn CareServiceRepository>,
        notifier: Arc<dyn BookingNotifier>,
    ) -> Self {
        Self {
            bookings,
            services,
            notifier,
        }
    }

    /// Price and persist a booking request, then send the invoice in the background.
    ///
    /// `user` is the signed-in caller, if any. Their name and email fill in
    /// missing contact details and the booking is linked to their account.
    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
        user: Option<&User>,
    ) -> Result<Booking> {
        let missing = || AppError::validation("Missing required fields for booking.");

        let service_slug = required(request.service_slug.as_deref()).ok_or_else(missing)?;
        let duration_unit = required(request.duration_unit.as_deref()).ok_or_else(missing)?;
        // Zero counts as absent, like a blank string
        let duration_value = request
            .duration_value
            .filter(|value| *value != 0)
            .ok_or_else(missing)?;
        let division = required(request.division.as_deref()).ok_or_else(missing)?;
        let district = required(request.district.as_deref()).ok_or_else(missing)?;
        let city = required(request.city.as_deref()).ok_or_else(missing)?;
        let address = required(request.address.as_deref()).ok_or_else(missing)?;

        let duration_unit: DurationUnit = duration_unit
            .parse()
            .map_err(|_| AppError::validation("Duration unit must be 'hour' or 'day'."))?;

        let service = self
            .services
            .find_by_slug(service_slug)
            .await?
            .filter(CareService::is_active)
            .ok_or_else(|| AppError::not_found("Service not found."))?;

        let duration_value = u32::try_from(duration_value)
            .map_err(|_| AppError::validation("Invalid duration or pricing configuration."))?;
        let price = rate_calculator::quote(&service.pricing, duration_unit, duration_value)?;

        let customer = resolve_contact(request.customer, user)?;

        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            user_id: user.map(|u| u.id.clone()),
            service_id: service.id.clone(),
            service_slug: service.slug.clone(),
            service_name: service.name.clone(),
            duration_unit: price.unit,
            duration_value: price.value,
            per_unit_rate: price.per_unit_rate,
            total_cost: price.total_cost,
            currency: price.currency,
            location: Location {
                division: division.to_string(),
                district: district.to_string(),
                city: city.to_string(),
                area: request
                    .area
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string(),
                address: address.to_string(),
            },
            customer,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        self.bookings.insert(&booking).await?;

        info!(
            booking_id = %booking.id,
            service_slug = %booking.service_slug,
            total_cost = %booking.total_cost,
            "Booking created"
        );

        self.dispatch_invoice(&booking, service);

        Ok(booking)
    }

    /// Fetch one booking the caller is allowed to see
    pub async fn get_booking(&self, id: &str, user: Option<&User>) -> Result<Booking> {
        let booking = self.find(id).await?;
        authorize(&booking, user)?;
        Ok(booking)
    }

    /// The caller's own bookings, newest first
    pub async fn list_for_user(&self, user: &User) -> Result<Vec<Booking>> {
        self.bookings.list_for_user(&user.id).await
    }

    /// Every booking, newest first (admin console)
    pub async fn list_all(&self) -> Result<Vec<Booking>> {
        self.bookings.list_all().await
    }

    /// Set a booking's status on behalf of its owner or an admin.
    ///
    /// The status is validated before anything is read or written.
    pub async fn update_status(
        &self,
        id: &str,
        status: Option<&str>,
        user: Option<&User>,
    ) -> Result<Booking> {
        let status = parse_status(status)?;
        let booking = self.find(id).await?;
        authorize(&booking, user)?;
        self.apply_status(booking, status).await
    }

    /// Admin console variant; no ownership check
    pub async fn set_status(&self, id: &str, status: Option<&str>) -> Result<Booking> {
        let status = parse_status(status)?;
        let booking = self.find(id).await?;
        self.apply_status(booking, status).await
    }

    async fn apply_status(&self, mut booking: Booking, status: BookingStatus) -> Result<Booking> {
        let previous = booking.status;
        let now = Utc::now();

        if !self.bookings.update_status(&booking.id, status, now).await? {
            return Err(AppError::not_found("Booking not found."));
        }

        booking.status = status;
        booking.updated_at = now;

        info!(
            booking_id = %booking.id,
            from = previous.as_str(),
            status = status.as_str(),
            "Booking status updated"
        );

        Ok(booking)
    }

    async fn find(&self, id: &str) -> Result<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found."))
    }

    fn dispatch_invoice(&self, booking: &Booking, service: CareService) {
        let notifier = Arc::clone(&self.notifier);
        let booking = booking.clone();

        tokio::spawn(async move {
            if let Err(e) = notifier.booking_created(&booking, &service).await {
                warn!(booking_id = %booking.id, error = %e, "Failed to send booking invoice");
            }
        });
    }
}

/// Trimmed value, or None when absent or blank
fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_status(status: Option<&str>) -> Result<BookingStatus> {
    status
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| AppError::validation("Invalid status."))
}

/// Owned bookings are visible to their owner and to admins only
fn authorize(booking: &Booking, user: Option<&User>) -> Result<()> {
    let Some(owner_id) = booking.user_id.as_deref() else {
        return Ok(());
    };

    match user {
        None => Err(AppError::unauthorized("Sign in required.")),
        Some(user) if user.id == owner_id || user.is_admin() => Ok(()),
        Some(_) => Err(AppError::forbidden("You do not have access to this booking.")),
    }
}

/// Contact from the form, falling back to the signed-in account
fn resolve_contact(input: Option<CustomerInput>, user: Option<&User>) -> Result<CustomerContact> {
    let input = input.unwrap_or_default();

    let name = required(input.name.as_deref())
        .map(str::to_string)
        .or_else(|| user.map(|u| u.name.clone()))
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("Customer name is required."))?;
    let email = required(input.email.as_deref())
        .map(str::to_string)
        .or_else(|| user.map(|u| u.email.clone()))
        .filter(|e| e.contains('@'))
        .ok_or_else(|| AppError::validation("A valid customer email is required."))?;
    let phone = required(input.phone.as_deref()).map(str::to_string);

    Ok(CustomerContact { name, email, phone })
}
