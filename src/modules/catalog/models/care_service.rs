// A care service is what customers book. Its pricing drives the booking
// quote: a base rate per hour or per day in a single currency.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{Currency, DurationUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Active,
    Inactive,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        ServiceStatus::Active
    }
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Active => "active",
            ServiceStatus::Inactive => "inactive",
        }
    }
}

impl std::str::FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ServiceStatus::Active),
            "inactive" => Ok(ServiceStatus::Inactive),
            _ => Err(format!("Invalid service status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub base_rate: Decimal,
    pub unit: DurationUnit,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareService {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub pricing: Pricing,
    pub status: ServiceStatus,
    pub label: String,
    pub icon: String,
    pub tagline: String,
    pub short_description: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CareService {
    pub fn is_active(&self) -> bool {
        self.status == ServiceStatus::Active
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub pricing: Option<Pricing>,
    pub status: Option<ServiceStatus>,
    pub label: Option<String>,
    pub icon: Option<String>,
    pub tagline: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
}
