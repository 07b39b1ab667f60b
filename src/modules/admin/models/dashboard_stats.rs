use rust_decimal::Decimal;
use serde::Serialize;

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_bookings: i64,
    pub total_users: i64,
    pub total_services: i64,
    /// Sum of `totalCost` over completed bookings
    pub total_revenue: Decimal,
}
