use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Currency, DurationUnit};

/// Booking lifecycle status. Any status may be set to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    /// Exact match only; `pending` is not a status
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid booking status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub division: String,
    pub district: String,
    pub city: String,
    #[serde(default)]
    pub area: String,
    pub address: String,
}

impl Location {
    /// "city, area, district, division" with blank parts skipped
    pub fn summary(&self) -> String {
        [&self.city, &self.area, &self.district, &self.division]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Contact snapshot taken when the booking is made
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: Option<String>,
    pub service_id: String,
    pub service_slug: String,
    pub service_name: String,
    pub duration_unit: DurationUnit,
    pub duration_value: u32,
    pub per_unit_rate: Decimal,
    pub total_cost: Decimal,
    pub currency: Currency,
    pub location: Location,
    pub customer: CustomerContact,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Last six characters of the id, used as a short reference
    pub fn short_ref(&self) -> &str {
        let start = self
            .id
            .char_indices()
            .rev()
            .nth(5)
            .map(|(index, _)| index)
            .unwrap_or(0);
        &self.id[start..]
    }
}

/// Booking form payload. Every field is optional here so that missing
/// fields surface as one validation error instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub service_slug: Option<String>,
    pub duration_unit: Option<String>,
    pub duration_value: Option<i64>,
    pub division: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub address: Option<String>,
    pub customer: Option<CustomerInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}
