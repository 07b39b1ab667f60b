use std::sync::Arc;

use tracing::debug;

use crate::core::Result;
use crate::modules::accounts::repositories::UserRepository;
use crate::modules::admin::models::DashboardStats;
use crate::modules::bookings::repositories::BookingRepository;
use crate::modules::catalog::repositories::CareServiceRepository;

/// Aggregates for the admin dashboard
pub struct AdminService {
    bookings: Arc<dyn BookingRepository>,
    users: Arc<dyn UserRepository>,
    services: Arc<dyn CareServiceRepository>,
}

impl AdminService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        users: Arc<dyn UserRepository>,
        services: Arc<dyn CareServiceRepository>,
    ) -> Self {
        Self {
            bookings,
            users,
            services,
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let (total_bookings, total_users, total_services, total_revenue) = tokio::try_join!(
            self.bookings.count(),
            self.users.count(),
            self.services.count(),
            self.bookings.completed_revenue(),
        )?;

        debug!(total_bookings, total_users, total_services, "Dashboard stats computed");

        Ok(DashboardStats {
            total_bookings,
            total_users,
            total_services,
            total_revenue,
        })
    }
}
