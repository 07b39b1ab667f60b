use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{
    CareService, CreateServiceRequest, Pricing, ServiceStatus, UpdateServiceRequest,
};
use crate::modules::catalog::repositories::CareServiceRepository;

/// Service for catalog browsing and admin maintenance
pub struct CatalogService {
    repo: Arc<dyn CareServiceRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CareServiceRepository>) -> Self {
        Self { repo }
    }

    /// Active service by slug; inactive services are hidden from the public catalog
    pub async fn get_by_slug(&self, slug: &str) -> Result<CareService> {
        self.repo
            .find_by_slug(slug)
            .await?
            .filter(CareService::is_active)
            .ok_or_else(|| AppError::not_found("Service not found."))
    }

    pub async fn list_active(&self) -> Result<Vec<CareService>> {
        self.repo.list(true).await
    }

    pub async fn list_all(&self) -> Result<Vec<CareService>> {
        self.repo.list(false).await
    }

    /// Create a service. New services always start active.
    pub async fn create(&self, request: CreateServiceRequest) -> Result<CareService> {
        let slug = validate_slug(request.slug.as_deref().unwrap_or_default())?;
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation("Missing required field: name."))?
            .to_string();
        let pricing = request
            .pricing
            .ok_or_else(|| AppError::validation("Missing required field: pricing."))?;
        validate_pricing(&pricing)?;

        let now = Utc::now();
        let service = CareService {
            id: Uuid::new_v4().to_string(),
            slug,
            name,
            pricing,
            status: ServiceStatus::Active,
            label: request.label,
            icon: request.icon,
            tagline: request.tagline,
            short_description: request.short_description,
            description: request.description,
            created_at: now,
            updated_at: now,
        };

        self.repo.insert(&service).await?;
        info!(service_id = %service.id, service_slug = %service.slug, "Service created");

        Ok(service)
    }

    /// Apply a partial update
    pub async fn update(&self, id: &str, patch: UpdateServiceRequest) -> Result<CareService> {
        let mut service = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Service not found."))?;

        if let Some(slug) = patch.slug {
            service.slug = validate_slug(&slug)?;
        }
        if let Some(name) = patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError::validation("Service name cannot be empty."));
            }
            service.name = name.to_string();
        }
        if let Some(pricing) = patch.pricing {
            validate_pricing(&pricing)?;
            service.pricing = pricing;
        }
        if let Some(status) = patch.status {
            service.status = status;
        }
        if let Some(label) = patch.label {
            service.label = label;
        }
        if let Some(icon) = patch.icon {
            service.icon = icon;
        }
        if let Some(tagline) = patch.tagline {
            service.tagline = tagline;
        }
        if let Some(short_description) = patch.short_description {
            service.short_description = short_description;
        }
        if let Some(description) = patch.description {
            service.description = description;
        }
        service.updated_at = Utc::now();

        self.repo.update(&service).await?;
        info!(
            service_id = %service.id,
            service_slug = %service.slug,
            status = service.status.as_str(),
            "Service updated"
        );

        Ok(service)
    }
}

/// Slugs are lower-case ASCII letters, digits and single dashes
fn validate_slug(raw: &str) -> Result<String> {
    let slug = raw.trim();
    let valid = !slug.is_empty()
        && slug.len() <= 120
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--");

    if !valid {
        return Err(AppError::validation(
            "Slug must be lower-case letters, digits and dashes.",
        ));
    }
    Ok(slug.to_string())
}

/// Largest base rate the `care_services.base_rate` column can hold
const MAX_BASE_RATE: i64 = 999_999_999_999;
/// Decimal places stored by `care_services.base_rate`
const BASE_RATE_SCALE: u32 = 2;

fn validate_pricing(pricing: &Pricing) -> Result<()> {
    if pricing.base_rate < Decimal::ZERO {
        return Err(AppError::validation("Base rate cannot be negative."));
    }
    if pricing.base_rate > Decimal::from(MAX_BASE_RATE) {
        return Err(AppError::validation("Base rate is too large."));
    }
    if pricing.base_rate.normalize().scale() > BASE_RATE_SCALE {
        return Err(AppError::validation(
            "Base rate can have at most 2 decimal places.",
        ));
    }
    Ok(())
}
